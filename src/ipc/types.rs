use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::calc::GradeConfiguration;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub started_at: DateTime<Utc>,
    /// Configuration used when a request does not carry its own.
    pub active_config: Option<GradeConfiguration>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            active_config: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
