use super::grade_scale::grade_for_config;
use super::model::{
    AssessmentType, CalculationMethod, DerivedSubjectScore, GradeConfiguration, Slot,
    StudentRosterEntry, SubjectAssessment,
};

/// Derived totals for one student under one assessment view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentAggregate {
    /// Ranking key. For Overall this is `average * qualifying_subjects`,
    /// not a raw sum.
    pub total_marks: f64,
    pub average: f64,
    pub qualifying_subjects: usize,
}

impl StudentAggregate {
    pub fn has_scores(&self) -> bool {
        self.qualifying_subjects > 0
    }
}

fn mean_of_slots(subject: &SubjectAssessment) -> f64 {
    let sum: f64 = subject.slots().iter().map(|s| s.value_or_zero()).sum();
    sum / 3.0
}

fn weighted_sum(subject: &SubjectAssessment, config: &GradeConfiguration) -> f64 {
    let w1 = config.weight_qa1.unwrap_or(0.0);
    let w2 = config.weight_qa2.unwrap_or(0.0);
    let w3 = config.weight_end_of_term.unwrap_or(0.0);
    subject.qa1.value_or_zero() * w1 / 100.0
        + subject.qa2.value_or_zero() * w2 / 100.0
        + subject.end_of_term.value_or_zero() * w3 / 100.0
}

/// Final score of one subject under the active policy. Missing or absent
/// slots count as 0; without a configuration the plain mean of the three
/// slots is used.
pub fn subject_final_score(
    subject: &SubjectAssessment,
    config: Option<&GradeConfiguration>,
) -> f64 {
    let Some(config) = config else {
        return mean_of_slots(subject);
    };
    match &config.calculation_method {
        CalculationMethod::AverageAll => mean_of_slots(subject),
        CalculationMethod::WeightedAverage => weighted_sum(subject, config),
        CalculationMethod::EndOfTermOnly => subject.end_of_term.value_or_zero(),
        CalculationMethod::Unrecognized(_) => mean_of_slots(subject),
    }
}

/// A subject counts toward Overall averages when any slot holds a positive score.
pub fn is_qualifying_subject(subject: &SubjectAssessment) -> bool {
    subject.slots().iter().any(|s| s.positive().is_some())
}

/// Qualification under a specific view: the named slot for single-slot
/// views, any slot for Overall.
pub fn is_qualifying_for(subject: &SubjectAssessment, assessment_type: AssessmentType) -> bool {
    match assessment_type.slot() {
        Some(slot) => subject.slot(slot).positive().is_some(),
        None => is_qualifying_subject(subject),
    }
}

pub fn qualifying_subject_count(subjects: &[SubjectAssessment]) -> usize {
    subjects.iter().filter(|s| is_qualifying_subject(s)).count()
}

/// Mean final score over qualifying subjects; 0 when there are none.
/// Callers tell "no data" apart from a real 0 via the qualifying count.
pub fn student_overall_average(
    subjects: &[SubjectAssessment],
    config: Option<&GradeConfiguration>,
) -> f64 {
    let (sum, count) = subjects
        .iter()
        .filter(|s| is_qualifying_subject(s))
        .fold((0.0_f64, 0_usize), |(sum, count), s| {
            (sum + subject_final_score(s, config), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / (count as f64)
    }
}

fn slot_sum(subjects: &[SubjectAssessment], slot: Slot) -> (f64, usize) {
    subjects
        .iter()
        .filter_map(|s| s.slot(slot).positive())
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1))
}

/// Mean of one slot across subjects where that slot is a positive score.
pub fn student_assessment_average(subjects: &[SubjectAssessment], slot: Slot) -> f64 {
    let (sum, count) = slot_sum(subjects, slot);
    if count == 0 {
        0.0
    } else {
        sum / (count as f64)
    }
}

pub fn student_aggregate(
    subjects: &[SubjectAssessment],
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
) -> StudentAggregate {
    match assessment_type.slot() {
        Some(slot) => {
            let (total_marks, count) = slot_sum(subjects, slot);
            StudentAggregate {
                total_marks,
                average: student_assessment_average(subjects, slot),
                qualifying_subjects: count,
            }
        }
        None => {
            let average = student_overall_average(subjects, config);
            let count = qualifying_subject_count(subjects);
            StudentAggregate {
                total_marks: average * (count as f64),
                average,
                qualifying_subjects: count,
            }
        }
    }
}

pub fn total_marks(
    student: &StudentRosterEntry,
    assessment_type: AssessmentType,
    config: Option<&GradeConfiguration>,
) -> f64 {
    student_aggregate(&student.subjects, assessment_type, config).total_marks
}

pub fn derive_subject_score(
    subject: &SubjectAssessment,
    config: Option<&GradeConfiguration>,
) -> DerivedSubjectScore {
    let final_score = subject_final_score(subject, config);
    DerivedSubjectScore {
        subject_id: subject.subject_id.clone(),
        subject_name: subject.subject_name.clone(),
        final_score,
        grade: grade_for_config(final_score, config),
        qualifying: is_qualifying_subject(subject),
    }
}

pub fn derive_subject_scores(
    subjects: &[SubjectAssessment],
    config: Option<&GradeConfiguration>,
) -> Vec<DerivedSubjectScore> {
    subjects
        .iter()
        .map(|s| derive_subject_score(s, config))
        .collect()
}
