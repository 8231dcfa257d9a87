use serde::Serialize;

use crate::aggregator::stats::PASS_THRESHOLD;
use crate::validate::{MAX_GRADE, MIN_GRADE};

/// Qualitative band of an average, used to color subject cards.
///
/// | Range   | Band         |
/// |---------|--------------|
/// | >= 8.0  | Excellent    |
/// | >= 6.5  | Good         |
/// | >= 5.5  | Sufficient   |
/// | < 5.5   | Insufficient |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    Excellent,
    Good,
    Sufficient,
    Insufficient,
}

pub fn band(average: f64) -> GradeBand {
    match average {
        a if a >= 8.0 => GradeBand::Excellent,
        a if a >= 6.5 => GradeBand::Good,
        a if a >= PASS_THRESHOLD => GradeBand::Sufficient,
        _ => GradeBand::Insufficient,
    }
}

/// How a required next grade should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequiredOutcome {
    /// Above 10: no single grade can reach the target.
    NotAchievable,
    /// Below 1: any grade keeps the target.
    AlreadyAchieved,
    Achievable { passing: bool },
}

pub fn required_outcome(required: f64) -> RequiredOutcome {
    match required {
        r if r > MAX_GRADE => RequiredOutcome::NotAchievable,
        r if r < MIN_GRADE => RequiredOutcome::AlreadyAchieved,
        r => RequiredOutcome::Achievable {
            passing: r >= PASS_THRESHOLD,
        },
    }
}

/// Where a subject's average stands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub target: f64,
    pub average: f64,
    pub met: bool,
    /// Points still missing; zero once the target is met.
    pub gap: f64,
    /// `average / target` as a percentage, capped at 100.
    pub progress_percent: f64,
}

pub fn target_progress(average: f64, target: f64) -> TargetProgress {
    let met = average >= target;
    TargetProgress {
        target,
        average,
        met,
        gap: if met { 0.0 } else { target - average },
        progress_percent: (average / target * 100.0).min(100.0),
    }
}
