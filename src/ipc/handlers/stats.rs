use crate::export::format_percentage_display;
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{parse_grade_filter, parse_sort};
use crate::ipc::types::{AppState, Request};
use crate::roster::{self, EnrichedRecord};
use serde::Serialize;
use serde_json::json;

const NO_DATA_MESSAGE: &str = "No student data yet. Add students to see class insights.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayRow {
    #[serde(flatten)]
    record: EnrichedRecord,
    percentage_display: String,
}

fn stats_get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let filter = parse_grade_filter(params)?;
    let view = state.roster.view(filter, None);
    let stats = roster::compute_metrics(view.iter().copied());
    Ok(json!({
        "hasData": stats.is_some(),
        "gradeFilter": filter,
        "stats": stats,
    }))
}

/// Everything one dashboard render needs, in a single pass.
fn dashboard_get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let filter = parse_grade_filter(params)?;
    let sort = parse_sort(params)?;

    if state.roster.is_empty() {
        return Ok(json!({
            "hasData": false,
            "message": NO_DATA_MESSAGE,
            "stats": null,
            "gradeOptions": roster::grade_options(&[]),
            "rows": [],
        }));
    }

    let rows: Vec<DisplayRow> = state
        .roster
        .view(filter, sort)
        .into_iter()
        .map(|r| {
            let record = EnrichedRecord::from(r);
            let percentage_display = format_percentage_display(record.percentage);
            DisplayRow {
                record,
                percentage_display,
            }
        })
        .collect();

    Ok(json!({
        "hasData": true,
        "stats": roster::compute_metrics(state.roster.records()),
        "gradeOptions": roster::grade_options(state.roster.records()),
        "gradeFilter": filter,
        "rows": rows,
    }))
}

fn handle_stats_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match stats_get(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_dashboard_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match dashboard_get(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "stats.get" => Some(handle_stats_get(state, req)),
        "dashboard.get" => Some(handle_dashboard_get(state, req)),
        _ => None,
    }
}
