use serde::de::DeserializeOwned;
use serde_json::json;

use crate::calc::GradeConfiguration;
use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};

fn decode<T: DeserializeOwned>(
    req: &Request,
    key: &str,
    raw: &serde_json::Value,
) -> Result<T, serde_json::Value> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        err(
            &req.id,
            "bad_params",
            format!("invalid params.{}", key),
            Some(json!({ "field": key, "reason": e.to_string() })),
        )
    })
}

pub fn required_param<T: DeserializeOwned>(
    req: &Request,
    key: &str,
) -> Result<T, serde_json::Value> {
    match req.params.get(key) {
        None => Err(err(
            &req.id,
            "bad_params",
            format!("missing params.{}", key),
            None,
        )),
        Some(raw) => decode(req, key, raw),
    }
}

pub fn optional_param<T: DeserializeOwned>(
    req: &Request,
    key: &str,
) -> Result<Option<T>, serde_json::Value> {
    match req.params.get(key) {
        None => Ok(None),
        Some(raw) if raw.is_null() => Ok(None),
        Some(raw) => decode(req, key, raw).map(Some),
    }
}

/// `config` absent: session config. `null`: no configuration. Object: use it.
pub fn resolve_config(
    state: &AppState,
    req: &Request,
) -> Result<Option<GradeConfiguration>, serde_json::Value> {
    match req.params.get("config") {
        None => Ok(state.active_config.clone()),
        Some(raw) if raw.is_null() => Ok(None),
        Some(raw) => decode(req, "config", raw).map(Some),
    }
}
