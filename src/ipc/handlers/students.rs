use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{get_required_int, get_required_str, parse_grade_filter, parse_sort};
use crate::ipc::types::{AppState, Request};
use crate::roster::{self, EnrichedRecord};
use serde_json::json;
use tracing::{info, warn};

fn students_add(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let maths = get_required_int(params, "maths")?;
    let physics = get_required_int(params, "physics")?;
    let english = get_required_int(params, "english")?;

    match state.roster.add_student(name, maths, physics, english) {
        Ok(record) => {
            let student = EnrichedRecord::from(record);
            info!(id = %student.id, name = %student.name, grade = %student.grade, "student added");
            Ok(json!({ "student": student }))
        }
        Err(e) => {
            warn!(error = %e, "student rejected");
            Err(e.into())
        }
    }
}

fn students_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let filter = parse_grade_filter(params)?;
    let sort = parse_sort(params)?;
    let view = state.roster.view(filter, sort);
    Ok(json!({
        "hasData": !state.roster.is_empty(),
        "gradeFilter": filter,
        "students": roster::compute_derived(view.iter().copied()),
    }))
}

fn grades_options(state: &AppState) -> serde_json::Value {
    json!({ "options": roster::grade_options(state.roster.records()) })
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_add(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_list(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_students_add(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        "grades.options" => Some(ok(&req.id, grades_options(state))),
        _ => None,
    }
}
