use gradebookd::calc::{
    build_result_set, build_result_set_with, total_marks, AssessmentType, CalculationMethod,
    GradeConfiguration, Letter, RankingStyle, StudentRosterEntry, StudentStatus,
};
use serde_json::json;

fn roster(value: serde_json::Value) -> Vec<StudentRosterEntry> {
    serde_json::from_value(value).expect("parse roster")
}

fn average_all(pass_mark: u32) -> GradeConfiguration {
    GradeConfiguration {
        calculation_method: CalculationMethod::AverageAll,
        pass_mark: Some(pass_mark),
        configuration_name: Some("Term 2 default".to_string()),
        ..GradeConfiguration::default()
    }
}

fn three_student_roster() -> Vec<StudentRosterEntry> {
    roster(json!([
        {
            "studentId": "a",
            "name": "Amara Banda",
            "examNumber": "F2-001",
            "classId": "form-2a",
            "subjects": [
                { "subjectId": "math", "subjectName": "Mathematics", "qa1": 90, "qa2": 80, "endOfTerm": 70 },
                { "subjectId": "eng", "subjectName": "English", "qa1": 60, "qa2": 0, "endOfTerm": 0 }
            ]
        },
        {
            "studentId": "b",
            "name": "Chikondi Phiri",
            "examNumber": "F2-002",
            "classId": "form-2a",
            "subjects": [
                { "subjectId": "math", "subjectName": "Mathematics", "qa1": 70, "qa2": 75, "endOfTerm": 80 },
                { "subjectId": "eng", "subjectName": "English", "qa1": 65, "qa2": 70, "endOfTerm": 75 }
            ]
        },
        {
            "studentId": "c",
            "name": "Dalitso Mwale",
            "examNumber": "F2-003",
            "classId": "form-2a",
            "subjects": [
                { "subjectId": "math", "subjectName": "Mathematics", "qa1": null, "qa1Absent": true },
                { "subjectId": "eng", "subjectName": "English" }
            ]
        }
    ]))
}

#[test]
fn overall_scenario_matches_hand_computation() {
    let cfg = average_all(50);
    let rs = build_result_set(&three_student_roster(), AssessmentType::Overall, Some(&cfg));

    let a = rs.rows.iter().find(|r| r.student_id == "a").expect("row a");
    assert!((a.average - 50.0).abs() < 1e-9);
    assert!((a.total_marks - 100.0).abs() < 1e-9);
    assert_eq!(a.grade, Letter::D);
    assert_eq!(a.status, StudentStatus::Passed);
    assert_eq!(a.qualifying_subjects, 2);

    let b = rs.rows.iter().find(|r| r.student_id == "b").expect("row b");
    assert!((b.average - 72.5).abs() < 1e-9);
    assert_eq!(b.grade, Letter::B);

    let c = rs.rows.iter().find(|r| r.student_id == "c").expect("row c");
    assert_eq!(c.total_marks, 0.0);
    assert_eq!(c.grade, Letter::F);
    assert_eq!(c.average_display, "N/A");

    let order: Vec<(&str, u32)> = rs
        .rows
        .iter()
        .map(|r| (r.student_id.as_str(), r.rank))
        .collect();
    assert_eq!(order, vec![("b", 1), ("a", 2), ("c", 3)]);

    assert_eq!(rs.summary.total_students, 3);
    assert_eq!(rs.summary.students_with_scores, 2);
    assert!((rs.summary.class_average - 61.25).abs() < 1e-9);
    assert_eq!(rs.summary.pass_count, 2);
    assert!((rs.summary.pass_rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(rs.summary.top_performer.name, "Chikondi Phiri");
    assert_eq!(rs.summary.grade_distribution.f, 1);
}

#[test]
fn overall_total_marks_is_average_times_qualifying_subjects() {
    let cfg = average_all(50);
    let roster = three_student_roster();

    let a = &roster[0];
    let total = total_marks(a, AssessmentType::Overall, Some(&cfg));
    assert!((total - 100.0).abs() < 1e-9);

    let c = &roster[2];
    assert_eq!(total_marks(c, AssessmentType::Overall, Some(&cfg)), 0.0);

    // Single-slot views sum the raw slot instead.
    assert_eq!(total_marks(a, AssessmentType::Qa1, Some(&cfg)), 150.0);
}

#[test]
fn pass_rate_counts_students_without_scores() {
    let mut entries = Vec::new();
    for i in 0..10 {
        let subjects = if i < 6 {
            json!([{ "subjectId": "math", "subjectName": "Mathematics", "qa1": 75 }])
        } else {
            json!([])
        };
        entries.push(json!({
            "studentId": format!("s{}", i),
            "name": format!("Student {}", i),
            "subjects": subjects
        }));
    }
    let rs = build_result_set(&roster(json!(entries)), AssessmentType::Qa1, None);
    assert_eq!(rs.summary.students_with_scores, 6);
    assert_eq!(rs.summary.pass_count, 6);
    assert_eq!(rs.summary.fail_count, 4);
    assert!((rs.summary.pass_rate - 60.0).abs() < 1e-9);
    assert!((rs.summary.class_average - 75.0).abs() < 1e-9);
}

#[test]
fn single_assessment_views_read_only_their_slot() {
    let rs = build_result_set(&three_student_roster(), AssessmentType::Qa2, None);

    let a = rs.rows.iter().find(|r| r.student_id == "a").expect("row a");
    // English qa2 = 0 does not qualify.
    assert_eq!(a.qualifying_subjects, 1);
    assert_eq!(a.total_marks, 80.0);
    assert_eq!(a.average, 80.0);
    assert_eq!(a.grade, Letter::A);

    let b = rs.rows.iter().find(|r| r.student_id == "b").expect("row b");
    assert_eq!(b.total_marks, 145.0);
    assert_eq!(b.rank, 1);

    let columns: Vec<&str> = rs.columns.iter().map(|c| c.subject_id.as_str()).collect();
    assert_eq!(columns, vec!["math", "eng"]);
}

#[test]
fn weighted_and_end_of_term_policies_change_overall_only() {
    let weighted = GradeConfiguration {
        calculation_method: CalculationMethod::WeightedAverage,
        weight_qa1: Some(20.0),
        weight_qa2: Some(20.0),
        weight_end_of_term: Some(60.0),
        ..GradeConfiguration::default()
    };
    let roster = three_student_roster();
    let rs = build_result_set(&roster, AssessmentType::Overall, Some(&weighted));
    let a = rs.rows.iter().find(|r| r.student_id == "a").expect("row a");
    // math: 18 + 16 + 42 = 76; eng: 12
    assert!((a.average - 44.0).abs() < 1e-9);
    assert_eq!(a.grade, Letter::F);

    let qa1_plain = build_result_set(&roster, AssessmentType::Qa1, None);
    let qa1_weighted = build_result_set(&roster, AssessmentType::Qa1, Some(&weighted));
    assert_eq!(qa1_plain.rows, qa1_weighted.rows);
}

#[test]
fn competition_style_is_opt_in() {
    let tied = roster(json!([
        { "studentId": "1", "name": "One", "subjects": [{ "subjectId": "m", "qa1": 90 }] },
        { "studentId": "2", "name": "Two", "subjects": [{ "subjectId": "m", "qa1": 90 }] },
        { "studentId": "3", "name": "Three", "subjects": [{ "subjectId": "m", "qa1": 80 }] }
    ]));
    let dense = build_result_set(&tied, AssessmentType::Qa1, None);
    let ranks: Vec<u32> = dense.rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 2]);

    let competition =
        build_result_set_with(&tied, AssessmentType::Qa1, None, RankingStyle::Competition);
    let ranks: Vec<u32> = competition.rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 3]);
}

#[test]
fn repeated_builds_serialize_identically() {
    let cfg = average_all(55);
    let roster = three_student_roster();
    let first = build_result_set(&roster, AssessmentType::Overall, Some(&cfg));
    let second = build_result_set(&roster, AssessmentType::Overall, Some(&cfg));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}
