//! Grade aggregation and ranking.
//!
//! Everything here is a pure function of (roster, configuration). Each call
//! recomputes from scratch; nothing is cached between calls.

pub mod aggregate;
pub mod grade_scale;
pub mod model;
pub mod rank;
pub mod results;

pub use aggregate::{
    derive_subject_scores, is_qualifying_subject, student_aggregate,
    student_assessment_average, student_overall_average, subject_final_score, total_marks,
    StudentAggregate,
};
pub use grade_scale::{format_score, grade_for, round_off_1_decimal};
pub use model::{
    AssessmentType, CalculationMethod, DerivedSubjectScore, GradeConfiguration, Letter,
    ScoreSlot, Slot, StudentRosterEntry, StudentStatus, SubjectAssessment, DEFAULT_PASS_MARK,
};
pub use rank::{rank, rank_with_style, RankInput, RankedEntry, RankingStyle};
pub use results::{
    build_all_views, build_result_set, build_result_set_with, AllViews, DerivedStudentRow,
    ResultSet, ResultSummary, SubjectCell, SubjectColumn,
};
