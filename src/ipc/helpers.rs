use crate::ipc::error::HandlerErr;
use crate::roster::{GradeFilter, SortDirection};

pub fn get_required_str<'a>(params: &'a serde_json::Value, key: &str) -> Result<&'a str, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_required_int(params: &serde_json::Value, key: &str) -> Result<i64, HandlerErr> {
    match params.get(key) {
        None => Err(HandlerErr::bad_params(format!("missing {}", key))),
        Some(v) if v.is_null() => Err(HandlerErr::bad_params(format!("missing {}", key))),
        Some(v) => v
            .as_i64()
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be an integer", key))),
    }
}

/// Absent, null, or "All" means no filtering.
pub fn parse_grade_filter(params: &serde_json::Value) -> Result<GradeFilter, HandlerErr> {
    match params.get("gradeFilter") {
        None => Ok(GradeFilter::All),
        Some(v) if v.is_null() => Ok(GradeFilter::All),
        Some(v) => {
            let Some(s) = v.as_str() else {
                return Err(HandlerErr::bad_params(
                    "gradeFilter must be 'All' or a grade letter",
                ));
            };
            s.parse::<GradeFilter>().map_err(HandlerErr::bad_params)
        }
    }
}

/// Absent or null keeps insertion order.
pub fn parse_sort(params: &serde_json::Value) -> Result<Option<SortDirection>, HandlerErr> {
    match params.get("sort") {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => {
            let Some(s) = v.as_str() else {
                return Err(HandlerErr::bad_params(
                    "sort must be 'Ascending' or 'Descending'",
                ));
            };
            s.parse::<SortDirection>()
                .map(Some)
                .map_err(HandlerErr::bad_params)
        }
    }
}
