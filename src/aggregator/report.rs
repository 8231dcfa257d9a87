//! Composes the aggregator functions into the subject and dashboard views.

use chrono::Utc;
use std::collections::HashMap;
use tracing::debug;

use crate::aggregator::average::{required_grade, weighted_average};
use crate::aggregator::grade::{band, required_outcome, target_progress};
use crate::aggregator::stats::{
    LATEST_COUNT, PASS_THRESHOLD, distribution, highest, latest, lowest, monthly_average,
    pass_rate, timeline,
};
use crate::aggregator::types::{
    DashboardReport, RequiredGradeReport, SubjectAverage, SubjectReport,
};
use crate::aggregator::utility::{mean, round_one_decimal};
use crate::model::{Grade, Subject};
use crate::validate::RequiredGradeQuery;

const UNKNOWN_SUBJECT: &str = "Onbekend";

fn grades_of(subject_id: &str, grades: &[Grade]) -> Vec<Grade> {
    grades
        .iter()
        .filter(|g| g.subject_id == subject_id)
        .cloned()
        .collect()
}

/// Weighted average per subject, skipping subjects without grades.
/// Keeps the order of `subjects`.
pub fn subject_averages(subjects: &[Subject], grades: &[Grade]) -> Vec<SubjectAverage> {
    subjects
        .iter()
        .filter_map(|s| {
            weighted_average(&grades_of(&s.id, grades)).map(|average| SubjectAverage {
                subject_id: s.id.clone(),
                name: s.name.clone(),
                color: s.color.clone(),
                average,
            })
        })
        .collect()
}

/// Unweighted mean of the subject averages. Every subject counts once,
/// however many grades it has.
pub fn overall_average(subjects: &[Subject], grades: &[Grade]) -> Option<f64> {
    let averages: Vec<f64> = subject_averages(subjects, grades)
        .iter()
        .map(|a| a.average)
        .collect();
    mean(&averages)
}

/// Builds the detail view for one subject. `grades` may contain other
/// subjects' grades; only this subject's are used.
pub fn subject_report(subject: &Subject, grades: &[Grade]) -> SubjectReport {
    let own = grades_of(&subject.id, grades);
    let average = weighted_average(&own);

    debug!(
        subject_id = %subject.id,
        grade_count = own.len(),
        "Building subject report"
    );

    SubjectReport {
        subject_id: subject.id.clone(),
        name: subject.name.clone(),
        color: subject.color.clone(),
        grade_count: own.len(),
        average,
        band: average.map(band),
        highest: highest(&own),
        lowest: lowest(&own),
        pass_rate: pass_rate(&own, PASS_THRESHOLD),
        distribution: distribution(&own),
        timeline: timeline(&own, |g| g.test_type.to_string()),
        latest: latest(&own, LATEST_COUNT),
        target: match (average, subject.target_grade) {
            (Some(avg), Some(target)) => Some(target_progress(avg, target)),
            _ => None,
        },
    }
}

/// Builds the dashboard across all subjects.
pub fn dashboard_report(subjects: &[Subject], grades: &[Grade]) -> DashboardReport {
    let names: HashMap<&str, &str> = subjects
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();

    let overall = overall_average(subjects, grades);

    debug!(
        subject_count = subjects.len(),
        grade_count = grades.len(),
        "Building dashboard report"
    );

    DashboardReport {
        generated_at: Utc::now(),
        subject_count: subjects.len(),
        grade_count: grades.len(),
        overall_average: overall,
        highest: highest(grades),
        lowest: lowest(grades),
        pass_rate: pass_rate(grades, PASS_THRESHOLD),
        subjects: subject_averages(subjects, grades),
        monthly: monthly_average(grades),
        distribution: distribution(grades),
        timeline: timeline(grades, |g| {
            names
                .get(g.subject_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_SUBJECT)
                .to_string()
        }),
    }
}

/// Works out the grade needed on the next test of `subject`.
pub fn required_grade_report(
    subject: &Subject,
    grades: &[Grade],
    query: RequiredGradeQuery,
) -> RequiredGradeReport {
    let own = grades_of(&subject.id, grades);
    let required = required_grade(&own, query.target(), query.next_weight());

    RequiredGradeReport {
        subject_id: subject.id.clone(),
        name: subject.name.clone(),
        current_average: weighted_average(&own),
        target: query.target(),
        next_weight: query.next_weight(),
        required,
        display: round_one_decimal(required),
        outcome: required_outcome(required),
    }
}
