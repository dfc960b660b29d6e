use crate::roster::Roster;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything one session owns. Handlers get it by `&mut`; nothing is global.
#[derive(Debug)]
pub struct AppState {
    pub roster: Roster,
}
