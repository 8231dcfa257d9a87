//! Report types produced by the aggregator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregator::grade::{GradeBand, RequiredOutcome, TargetProgress};
use crate::model::Grade;

/// Weighted average of all grades dated within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    /// First day of the month.
    pub month: NaiveDate,
    /// Short chart label, e.g. `mrt 24`.
    pub label: String,
    pub average: f64,
}

/// One point of the grade-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub index: usize,
    pub grade: f64,
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAverage {
    pub subject_id: String,
    pub name: String,
    pub color: String,
    pub average: f64,
}

/// Everything shown on a subject's detail page.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectReport {
    pub subject_id: String,
    pub name: String,
    pub color: String,
    pub grade_count: usize,
    pub average: Option<f64>,
    pub band: Option<GradeBand>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub pass_rate: Option<f64>,
    pub distribution: BTreeMap<u8, usize>,
    pub timeline: Vec<TimelinePoint>,
    pub latest: Vec<Grade>,
    pub target: Option<TargetProgress>,
}

/// Statistics across all of a user's subjects.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub subject_count: usize,
    pub grade_count: usize,
    /// Unweighted mean of the per-subject averages.
    pub overall_average: Option<f64>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub pass_rate: Option<f64>,
    pub subjects: Vec<SubjectAverage>,
    pub monthly: Vec<MonthlyAverage>,
    pub distribution: BTreeMap<u8, usize>,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequiredGradeReport {
    pub subject_id: String,
    pub name: String,
    pub current_average: Option<f64>,
    pub target: f64,
    pub next_weight: f64,
    /// Unrounded solution of the target equation.
    pub required: f64,
    /// `required` rounded to one decimal for display.
    pub display: f64,
    pub outcome: RequiredOutcome,
}
