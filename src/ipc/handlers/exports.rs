use crate::export::{self, EXPORT_FILENAME, EXPORT_MIME};
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{parse_grade_filter, parse_sort};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

fn export_csv(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let filter = parse_grade_filter(params)?;
    let sort = parse_sort(params)?;
    let out_path = match params.get("outPath") {
        None => None,
        Some(v) if v.is_null() => None,
        Some(v) => match v.as_str().map(str::trim) {
            Some(s) if !s.is_empty() => Some(PathBuf::from(s)),
            _ => return Err(HandlerErr::bad_params("outPath must be a non-empty string")),
        },
    };

    if state.roster.is_empty() {
        return Ok(json!({
            "hasData": false,
            "filename": EXPORT_FILENAME,
            "mimeType": EXPORT_MIME,
            "rowsExported": 0,
        }));
    }

    let view = state.roster.view(filter, sort);
    let bytes = export::export_csv(view.iter().copied()).map_err(|e| HandlerErr {
        code: "export_failed",
        message: format!("{e:#}"),
        details: None,
    })?;

    if let Some(path) = out_path.as_ref() {
        export::write_export(path, &bytes).map_err(|e| HandlerErr {
            code: "io_failed",
            message: format!("{e:#}"),
            details: Some(json!({ "path": path.to_string_lossy() })),
        })?;
        info!(path = %path.display(), rows = view.len(), "export written");
    }

    let sha256 = export::sha256_hex(&bytes);
    let csv = String::from_utf8(bytes).map_err(|e| HandlerErr {
        code: "export_failed",
        message: e.to_string(),
        details: None,
    })?;

    let mut result = json!({
        "hasData": true,
        "filename": EXPORT_FILENAME,
        "mimeType": EXPORT_MIME,
        "gradeFilter": filter,
        "csv": csv,
        "rowsExported": view.len(),
        "sha256": sha256,
        "exportedAt": chrono::Utc::now().to_rfc3339(),
    });
    if let Some(path) = out_path {
        result["path"] = json!(path.to_string_lossy());
    }
    Ok(result)
}

fn handle_export_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    match export_csv(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.csv" => Some(handle_export_csv(state, req)),
        _ => None,
    }
}
