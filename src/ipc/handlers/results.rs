use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::calc::{self, AssessmentType, RankingStyle, StudentRosterEntry};
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_param, required_param, resolve_config};
use crate::ipc::types::{AppState, Request};

fn parse_roster(req: &Request) -> Result<Vec<StudentRosterEntry>, serde_json::Value> {
    required_param(req, "roster")
}

fn parse_ranking_style(req: &Request) -> Result<RankingStyle, serde_json::Value> {
    optional_param(req, "rankingStyle").map(|v| v.unwrap_or_default())
}

fn handle_results_build(state: &mut AppState, req: &Request) -> serde_json::Value {
    let roster = match parse_roster(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let assessment_type: AssessmentType = match required_param(req, "assessmentType") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let config = match resolve_config(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let style = match parse_ranking_style(req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let result_set =
        calc::build_result_set_with(&roster, assessment_type, config.as_ref(), style);
    debug!(
        id = %req.id,
        view = assessment_type.as_str(),
        rows = result_set.rows.len(),
        "results.build"
    );
    ok(
        &req.id,
        json!({
            "resultSet": result_set,
            "computedAt": Utc::now().to_rfc3339()
        }),
    )
}

fn handle_results_build_all(state: &mut AppState, req: &Request) -> serde_json::Value {
    let roster = match parse_roster(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let config = match resolve_config(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let style = match parse_ranking_style(req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let views = calc::build_all_views(&roster, config.as_ref(), style);
    ok(
        &req.id,
        json!({
            "views": views,
            "computedAt": Utc::now().to_rfc3339()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "results.build" => Some(handle_results_build(state, req)),
        "results.buildAll" => Some(handle_results_build_all(state, req)),
        _ => None,
    }
}
