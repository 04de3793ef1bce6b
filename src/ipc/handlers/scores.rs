use serde_json::json;

use crate::calc::{self, AssessmentType, SubjectAssessment, DEFAULT_PASS_MARK};
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_param, required_param, resolve_config};
use crate::ipc::types::{AppState, Request};

fn handle_grades_letter(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let score: f64 = match required_param(req, "score") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let pass_mark: u32 = match optional_param(req, "passMark") {
        Ok(v) => v.unwrap_or(DEFAULT_PASS_MARK),
        Err(e) => return e,
    };
    let grade = calc::grade_for(score, f64::from(pass_mark));
    ok(
        &req.id,
        json!({
            "grade": grade,
            "passing": grade.is_passing(),
            "passMark": pass_mark
        }),
    )
}

fn handle_subject_final(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject: SubjectAssessment = match required_param(req, "subject") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let config = match resolve_config(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let derived = calc::aggregate::derive_subject_score(&subject, config.as_ref());
    ok(&req.id, json!(derived))
}

fn handle_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subjects: Vec<SubjectAssessment> = match required_param(req, "subjects") {
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

    let agg = calc::student_aggregate(&subjects, assessment_type, config.as_ref());
    let subject_scores = match assessment_type {
        AssessmentType::Overall => calc::derive_subject_scores(&subjects, config.as_ref()),
        _ => Vec::new(),
    };
    ok(
        &req.id,
        json!({
            "assessmentType": assessment_type,
            "totalMarks": agg.total_marks,
            "average": agg.average,
            "qualifyingSubjects": agg.qualifying_subjects,
            "hasScores": agg.has_scores(),
            "subjects": subject_scores
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.letter" => Some(handle_grades_letter(state, req)),
        "scores.subjectFinal" => Some(handle_subject_final(state, req)),
        "scores.student" => Some(handle_student(state, req)),
        _ => None,
    }
}
