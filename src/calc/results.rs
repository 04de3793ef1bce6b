use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use super::aggregate::{is_qualifying_for, student_aggregate, subject_final_score, StudentAggregate};
use super::grade_scale::{format_score, grade_for};
use super::model::{
    effective_pass_mark, AssessmentType, GradeConfiguration, Letter, ScoreSlot,
    StudentRosterEntry, StudentStatus, SubjectAssessment,
};
use super::rank::{rank_positions, RankingStyle};

pub const NO_DATA: &str = "N/A";
pub const NOT_ENTERED: &str = "-";
pub const ABSENT: &str = "ABS";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectColumn {
    pub subject_id: String,
    pub subject_name: String,
    pub scored_count: usize,
    pub zero_count: usize,
    pub absent_count: usize,
    pub not_entered_count: usize,
    /// Mean of qualifying values in this column; 0 when none.
    pub class_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCell {
    pub subject_id: String,
    pub score: Option<f64>,
    pub grade: Option<Letter>,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStudentRow {
    pub student_id: String,
    pub name: String,
    pub exam_number: String,
    pub class_id: String,
    pub total_marks: f64,
    pub average: f64,
    pub average_display: String,
    pub grade: Letter,
    pub status: StudentStatus,
    pub rank: u32,
    pub qualifying_subjects: usize,
    pub cells: Vec<SubjectCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub student_id: Option<String>,
    pub name: String,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeDistribution {
    fn record(&mut self, grade: Letter) {
        match grade {
            Letter::A => self.a += 1,
            Letter::B => self.b += 1,
            Letter::C => self.c += 1,
            Letter::D => self.d += 1,
            Letter::F => self.f += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total_students: usize,
    pub students_with_scores: usize,
    pub class_average: f64,
    pub pass_count: usize,
    pub fail_count: usize,
    /// Percentage of the full roster, students without scores included.
    pub pass_rate: f64,
    pub top_performer: TopPerformer,
    pub median_average: Option<f64>,
    pub lowest_average: Option<f64>,
    pub grade_distribution: GradeDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub assessment_type: AssessmentType,
    pub pass_mark: u32,
    pub ranking_style: RankingStyle,
    pub columns: Vec<SubjectColumn>,
    pub rows: Vec<DerivedStudentRow>,
    pub summary: ResultSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllViews {
    pub qa1: ResultSet,
    pub qa2: ResultSet,
    pub end_of_term: ResultSet,
    pub overall: ResultSet,
}

struct ComputedStudent<'a> {
    entry: &'a StudentRosterEntry,
    aggregate: StudentAggregate,
    grade: Letter,
}

fn compute_student<'a>(
    entry: &'a StudentRosterEntry,
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
    pass_mark: f64,
) -> ComputedStudent<'a> {
    let aggregate = student_aggregate(&entry.subjects, assessment_type, config);
    // No qualifying scores is always a fail, whatever the pass mark.
    let grade = if aggregate.has_scores() {
        grade_for(aggregate.average, pass_mark)
    } else {
        Letter::F
    };
    ComputedStudent {
        entry,
        aggregate,
        grade,
    }
}

/// Subjects with at least one qualifying score anywhere in the roster, in
/// order of first appearance.
pub fn visible_subjects(
    roster: &[StudentRosterEntry],
    assessment_type: AssessmentType,
) -> Vec<(String, String)> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<(&str, &str)> = Vec::new();
    for student in roster {
        for s in &student.subjects {
            if seen.insert(s.subject_id.as_str()) {
                ordered.push((s.subject_id.as_str(), s.subject_name.as_str()));
            }
        }
    }

    let mut qualifying: HashSet<&str> = HashSet::new();
    for student in roster {
        for s in &student.subjects {
            if is_qualifying_for(s, assessment_type) {
                qualifying.insert(s.subject_id.as_str());
            }
        }
    }

    ordered
        .into_iter()
        .filter(|(id, _)| qualifying.contains(id))
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

/// The value a qualifying subject contributes under this view.
fn qualifying_value(
    subject: &SubjectAssessment,
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
) -> Option<f64> {
    match assessment_type.slot() {
        Some(slot) => subject.slot(slot).positive(),
        None if is_qualifying_for(subject, assessment_type) => {
            Some(subject_final_score(subject, config))
        }
        None => None,
    }
}

fn cell_for(
    subject_id: &str,
    subject: Option<&SubjectAssessment>,
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
    pass_mark: f64,
) -> SubjectCell {
    let scored = |v: f64| SubjectCell {
        subject_id: subject_id.to_string(),
        score: Some(v),
        grade: Some(grade_for(v, pass_mark)),
        display: format_score(v),
    };
    let sentinel = |display: &str| SubjectCell {
        subject_id: subject_id.to_string(),
        score: None,
        grade: None,
        display: display.to_string(),
    };

    let Some(subject) = subject else {
        return sentinel(NOT_ENTERED);
    };
    match assessment_type.slot() {
        Some(slot) => match subject.slot(slot) {
            ScoreSlot::Scored(v) => scored(v),
            ScoreSlot::Absent => sentinel(ABSENT),
            ScoreSlot::NotEntered => sentinel(NOT_ENTERED),
        },
        None => match qualifying_value(subject, assessment_type, config) {
            Some(v) => scored(v),
            None => sentinel(NOT_ENTERED),
        },
    }
}

fn column_stats(
    subject_id: &str,
    subject_name: &str,
    roster: &[StudentRosterEntry],
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
) -> SubjectColumn {
    let mut column = SubjectColumn {
        subject_id: subject_id.to_string(),
        subject_name: subject_name.to_string(),
        scored_count: 0,
        zero_count: 0,
        absent_count: 0,
        not_entered_count: 0,
        class_average: 0.0,
    };
    let mut sum = 0.0_f64;

    for student in roster {
        let Some(subject) = student.subject(subject_id) else {
            column.not_entered_count += 1;
            continue;
        };
        if let Some(v) = qualifying_value(subject, assessment_type, config) {
            column.scored_count += 1;
            sum += v;
            continue;
        }
        let slots: Vec<ScoreSlot> = match assessment_type.slot() {
            Some(slot) => vec![subject.slot(slot)],
            None => subject.slots().to_vec(),
        };
        if !slots.iter().any(|s| s.has_outcome()) {
            column.not_entered_count += 1;
        } else if slots.iter().any(|s| matches!(s, ScoreSlot::Absent)) {
            column.absent_count += 1;
        } else {
            column.zero_count += 1;
        }
    }

    if column.scored_count > 0 {
        column.class_average = sum / (column.scored_count as f64);
    }
    column
}

fn compute_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[(n / 2) - 1] + sorted[n / 2]) / 2.0)
    }
}

fn summarize(students: &[ComputedStudent<'_>]) -> ResultSummary {
    let total_students = students.len();
    let with_scores: Vec<&ComputedStudent<'_>> = students
        .iter()
        .filter(|s| s.aggregate.has_scores())
        .collect();
    let averages: Vec<f64> = with_scores.iter().map(|s| s.aggregate.average).collect();

    let class_average = if averages.is_empty() {
        0.0
    } else {
        averages.iter().sum::<f64>() / (averages.len() as f64)
    };

    let mut grade_distribution = GradeDistribution::default();
    for s in students {
        grade_distribution.record(s.grade);
    }
    let pass_count = students.iter().filter(|s| s.grade.is_passing()).count();
    let pass_rate = if total_students == 0 {
        0.0
    } else {
        100.0 * (pass_count as f64) / (total_students as f64)
    };

    let mut best: Option<&ComputedStudent<'_>> = None;
    for s in with_scores.iter().copied() {
        if best
            .map(|b| s.aggregate.average > b.aggregate.average)
            .unwrap_or(true)
        {
            best = Some(s);
        }
    }
    let top_performer = match best {
        Some(s) => TopPerformer {
            student_id: Some(s.entry.student_id.clone()),
            name: s.entry.name.clone(),
            average: Some(s.aggregate.average),
        },
        None => TopPerformer {
            student_id: None,
            name: NO_DATA.to_string(),
            average: None,
        },
    };

    ResultSummary {
        total_students,
        students_with_scores: with_scores.len(),
        class_average,
        pass_count,
        fail_count: total_students - pass_count,
        pass_rate,
        top_performer,
        median_average: compute_median(&averages),
        lowest_average: averages.iter().copied().reduce(f64::min),
        grade_distribution,
    }
}

pub fn build_result_set(
    roster: &[StudentRosterEntry],
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
) -> ResultSet {
    build_result_set_with(roster, assessment_type, config, RankingStyle::Dense)
}

pub fn build_result_set_with(
    roster: &[StudentRosterEntry],
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
    ranking_style: RankingStyle,
) -> ResultSet {
    let pass_mark = effective_pass_mark(config);
    let pass_mark_f = f64::from(pass_mark);
    let visible = visible_subjects(roster, assessment_type);

    let computed: Vec<ComputedStudent<'_>> = roster
        .iter()
        .map(|entry| compute_student(entry, assessment_type, config, pass_mark_f))
        .collect();

    let keys: Vec<f64> = computed.iter().map(|c| c.aggregate.total_marks).collect();
    let rows: Vec<DerivedStudentRow> = rank_positions(&keys, ranking_style)
        .into_iter()
        .map(|(idx, rank)| {
            let c = &computed[idx];
            let cells = visible
                .iter()
                .map(|(id, _)| {
                    cell_for(id, c.entry.subject(id), assessment_type, config, pass_mark_f)
                })
                .collect();
            DerivedStudentRow {
                student_id: c.entry.student_id.clone(),
                name: c.entry.name.clone(),
                exam_number: c.entry.exam_number.clone(),
                class_id: c.entry.class_id.clone(),
                total_marks: c.aggregate.total_marks,
                average: c.aggregate.average,
                average_display: if c.aggregate.has_scores() {
                    format_score(c.aggregate.average)
                } else {
                    NO_DATA.to_string()
                },
                grade: c.grade,
                status: StudentStatus::from_grade(c.grade),
                rank,
                qualifying_subjects: c.aggregate.qualifying_subjects,
                cells,
            }
        })
        .collect();

    let columns: Vec<SubjectColumn> = visible
        .iter()
        .map(|(id, name)| column_stats(id, name, roster, assessment_type, config))
        .collect();

    let summary = summarize(&computed);
    debug!(
        view = assessment_type.as_str(),
        students = roster.len(),
        columns = columns.len(),
        with_scores = summary.students_with_scores,
        "built result set"
    );

    ResultSet {
        assessment_type,
        pass_mark,
        ranking_style,
        columns,
        rows,
        summary,
    }
}

/// Result sets for every tab, each computed independently.
pub fn build_all_views(
    roster: &[StudentRosterEntry],
    config: Option<&GradeConfiguration>,
    ranking_style: RankingStyle,
) -> AllViews {
    let build = |t| build_result_set_with(roster, t, config, ranking_style);
    AllViews {
        qa1: build(AssessmentType::Qa1),
        qa2: build(AssessmentType::Qa2),
        end_of_term: build(AssessmentType::EndOfTerm),
        overall: build(AssessmentType::Overall),
    }
}
