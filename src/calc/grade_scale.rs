use super::model::{effective_pass_mark, GradeConfiguration, Letter};

/// Letter for a score, tiers checked top-down with closed lower bounds.
///
/// A pass mark above 60 leaves the D tier unreachable; that is accepted.
/// Out-of-range scores are not clamped here.
pub fn grade_for(score: f64, pass_mark: f64) -> Letter {
    if score >= 80.0 {
        Letter::A
    } else if score >= 70.0 {
        Letter::B
    } else if score >= 60.0 {
        Letter::C
    } else if score >= pass_mark {
        Letter::D
    } else {
        Letter::F
    }
}

pub fn grade_for_config(score: f64, config: Option<&GradeConfiguration>) -> Letter {
    grade_for(score, f64::from(effective_pass_mark(config)))
}

/// VB6-compatible 1-decimal rounding: `Int(10*x + 0.5) / 10`
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

/// Display text for a score: one decimal, trailing `.0` dropped.
pub fn format_score(x: f64) -> String {
    let r = round_off_1_decimal(x);
    if r.fract() == 0.0 {
        format!("{:.0}", r)
    } else {
        format!("{:.1}", r)
    }
}
