use serde::{Deserialize, Serialize};

pub const DEFAULT_PASS_MARK: u32 = 50;

/// Policy used to turn a subject's three slots into one final score.
///
/// Labels that match none of the known policies are kept verbatim in
/// `Unrecognized` and scored exactly like `AverageAll`. A `null` method is
/// `AverageAll`; a non-string method is `Unrecognized` with its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<serde_json::Value>", into = "String")]
pub enum CalculationMethod {
    #[default]
    AverageAll,
    WeightedAverage,
    EndOfTermOnly,
    Unrecognized(String),
}

impl CalculationMethod {
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "averageall" | "average" => CalculationMethod::AverageAll,
            "weightedaverage" | "weighted" => CalculationMethod::WeightedAverage,
            "endoftermonly" | "endofterm" => CalculationMethod::EndOfTermOnly,
            _ => CalculationMethod::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CalculationMethod::AverageAll => "AverageAll",
            CalculationMethod::WeightedAverage => "WeightedAverage",
            CalculationMethod::EndOfTermOnly => "EndOfTermOnly",
            CalculationMethod::Unrecognized(raw) => raw,
        }
    }
}

impl From<Option<serde_json::Value>> for CalculationMethod {
    fn from(raw: Option<serde_json::Value>) -> Self {
        match raw {
            None | Some(serde_json::Value::Null) => CalculationMethod::AverageAll,
            Some(serde_json::Value::String(s)) => CalculationMethod::parse(&s),
            Some(other) => CalculationMethod::Unrecognized(other.to_string()),
        }
    }
}

impl From<CalculationMethod> for String {
    fn from(method: CalculationMethod) -> Self {
        method.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeConfiguration {
    #[serde(default)]
    pub calculation_method: CalculationMethod,
    #[serde(default)]
    pub weight_qa1: Option<f64>,
    #[serde(default)]
    pub weight_qa2: Option<f64>,
    #[serde(default)]
    pub weight_end_of_term: Option<f64>,
    #[serde(default)]
    pub pass_mark: Option<u32>,
    #[serde(default)]
    pub configuration_name: Option<String>,
}

impl GradeConfiguration {
    pub fn pass_mark(&self) -> u32 {
        self.pass_mark.unwrap_or(DEFAULT_PASS_MARK)
    }
}

/// Pass mark in effect for an optional configuration.
pub fn effective_pass_mark(config: Option<&GradeConfiguration>) -> u32 {
    config
        .map(GradeConfiguration::pass_mark)
        .unwrap_or(DEFAULT_PASS_MARK)
}

/// Recorded outcome of one assessment slot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScoreSlot {
    #[default]
    NotEntered,
    Absent,
    Scored(f64),
}

impl ScoreSlot {
    /// An absence flag wins over any number sent alongside it.
    pub fn from_parts(value: Option<f64>, absent: bool) -> Self {
        if absent {
            return ScoreSlot::Absent;
        }
        value.map(ScoreSlot::Scored).unwrap_or(ScoreSlot::NotEntered)
    }

    pub fn into_parts(self) -> (Option<f64>, bool) {
        match self {
            ScoreSlot::NotEntered => (None, false),
            ScoreSlot::Absent => (None, true),
            ScoreSlot::Scored(v) => (Some(v), false),
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            ScoreSlot::Scored(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_or_zero(self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// The score, if it qualifies for averaging (strictly positive).
    pub fn positive(self) -> Option<f64> {
        self.value().filter(|v| *v > 0.0)
    }

    pub fn has_outcome(self) -> bool {
        !matches!(self, ScoreSlot::NotEntered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "qa1", alias = "QA1")]
    Qa1,
    #[serde(rename = "qa2", alias = "QA2")]
    Qa2,
    #[serde(rename = "endOfTerm", alias = "END", alias = "END_OF_TERM", alias = "end")]
    EndOfTerm,
}

/// Which table the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "qa1", alias = "QA1")]
    Qa1,
    #[serde(rename = "qa2", alias = "QA2")]
    Qa2,
    #[serde(rename = "endOfTerm", alias = "END", alias = "END_OF_TERM", alias = "end")]
    EndOfTerm,
    #[serde(rename = "overall", alias = "OVERALL")]
    Overall,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 4] = [
        AssessmentType::Qa1,
        AssessmentType::Qa2,
        AssessmentType::EndOfTerm,
        AssessmentType::Overall,
    ];

    /// The single slot this view reads, or `None` for Overall.
    pub fn slot(self) -> Option<Slot> {
        match self {
            AssessmentType::Qa1 => Some(Slot::Qa1),
            AssessmentType::Qa2 => Some(Slot::Qa2),
            AssessmentType::EndOfTerm => Some(Slot::EndOfTerm),
            AssessmentType::Overall => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentType::Qa1 => "qa1",
            AssessmentType::Qa2 => "qa2",
            AssessmentType::EndOfTerm => "endOfTerm",
            AssessmentType::Overall => "overall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SubjectAssessmentRecord", into = "SubjectAssessmentRecord")]
pub struct SubjectAssessment {
    pub subject_id: String,
    pub subject_name: String,
    pub qa1: ScoreSlot,
    pub qa2: ScoreSlot,
    pub end_of_term: ScoreSlot,
}

impl SubjectAssessment {
    pub fn new(subject_id: impl Into<String>, subject_name: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
            qa1: ScoreSlot::NotEntered,
            qa2: ScoreSlot::NotEntered,
            end_of_term: ScoreSlot::NotEntered,
        }
    }

    pub fn slot(&self, slot: Slot) -> ScoreSlot {
        match slot {
            Slot::Qa1 => self.qa1,
            Slot::Qa2 => self.qa2,
            Slot::EndOfTerm => self.end_of_term,
        }
    }

    pub fn slots(&self) -> [ScoreSlot; 3] {
        [self.qa1, self.qa2, self.end_of_term]
    }
}

/// Wire shape: nullable score plus an independent absence flag per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectAssessmentRecord {
    subject_id: String,
    #[serde(default)]
    subject_name: String,
    #[serde(default)]
    qa1: Option<f64>,
    #[serde(default)]
    qa2: Option<f64>,
    #[serde(default)]
    end_of_term: Option<f64>,
    #[serde(default)]
    qa1_absent: bool,
    #[serde(default)]
    qa2_absent: bool,
    #[serde(default)]
    end_of_term_absent: bool,
}

impl From<SubjectAssessmentRecord> for SubjectAssessment {
    fn from(r: SubjectAssessmentRecord) -> Self {
        Self {
            subject_id: r.subject_id,
            subject_name: r.subject_name,
            qa1: ScoreSlot::from_parts(r.qa1, r.qa1_absent),
            qa2: ScoreSlot::from_parts(r.qa2, r.qa2_absent),
            end_of_term: ScoreSlot::from_parts(r.end_of_term, r.end_of_term_absent),
        }
    }
}

impl From<SubjectAssessment> for SubjectAssessmentRecord {
    fn from(s: SubjectAssessment) -> Self {
        let (qa1, qa1_absent) = s.qa1.into_parts();
        let (qa2, qa2_absent) = s.qa2.into_parts();
        let (end_of_term, end_of_term_absent) = s.end_of_term.into_parts();
        Self {
            subject_id: s.subject_id,
            subject_name: s.subject_name,
            qa1,
            qa2,
            end_of_term,
            qa1_absent,
            qa2_absent,
            end_of_term_absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRosterEntry {
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub exam_number: String,
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub subjects: Vec<SubjectAssessment>,
}

impl StudentRosterEntry {
    pub fn subject(&self, subject_id: &str) -> Option<&SubjectAssessment> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

impl Letter {
    pub fn is_passing(self) -> bool {
        self != Letter::F
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Passed,
    Failed,
}

impl StudentStatus {
    pub fn from_grade(grade: Letter) -> Self {
        if grade.is_passing() {
            StudentStatus::Passed
        } else {
            StudentStatus::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSubjectScore {
    pub subject_id: String,
    pub subject_name: String,
    pub final_score: f64,
    pub grade: Letter,
    /// Whether any slot holds a positive score.
    pub qualifying: bool,
}
