use serde_json::json;
use tracing::info;

use crate::calc::GradeConfiguration;
use crate::ipc::error::ok;
use crate::ipc::helpers::optional_param;
use crate::ipc::types::{AppState, Request};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "startedAt": state.started_at.to_rfc3339(),
            "hasActiveConfig": state.active_config.is_some()
        }),
    )
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "config": state.active_config }))
}

fn handle_config_set_active(state: &mut AppState, req: &Request) -> serde_json::Value {
    let config = match optional_param::<GradeConfiguration>(req, "config") {
        Ok(v) => v,
        Err(e) => return e,
    };
    info!(
        name = config
            .as_ref()
            .and_then(|c| c.configuration_name.as_deref())
            .unwrap_or("<none>"),
        method = config
            .as_ref()
            .map(|c| c.calculation_method.as_str())
            .unwrap_or("<none>"),
        "active grade configuration changed"
    );
    state.active_config = config;
    ok(&req.id, json!({ "config": state.active_config }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "config.setActive" => Some(handle_config_set_active(state, req)),
        _ => None,
    }
}
