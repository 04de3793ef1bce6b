use serde_json::json;

use crate::calc::{self, RankInput, RankingStyle};
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_param, required_param};
use crate::ipc::types::{AppState, Request};

fn handle_rank(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let rows: Vec<RankInput> = match required_param(req, "rows") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let style: RankingStyle = match optional_param(req, "style") {
        Ok(v) => v.unwrap_or_default(),
        Err(e) => return e,
    };
    let ranked = calc::rank_with_style(&rows, style);
    ok(&req.id, json!({ "style": style, "rows": ranked }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "ranking.rank" => Some(handle_rank(state, req)),
        _ => None,
    }
}
