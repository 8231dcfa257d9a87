use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::aggregator::average::WeightedTotals;
use crate::aggregator::types::{MonthlyAverage, TimelinePoint};
use crate::model::Grade;

/// Lowest value that counts as a pass.
pub const PASS_THRESHOLD: f64 = 5.5;

/// Dutch month abbreviations, January first.
const MONTHS_NL: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// Number of grades kept by [`latest`] for the subject cards.
pub const LATEST_COUNT: usize = 3;

/// Percentage (0–100) of grades at or above `threshold`.
/// Returns `None` for an empty list.
pub fn pass_rate(grades: &[Grade], threshold: f64) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    let passing = grades.iter().filter(|g| g.grade >= threshold).count();
    Some(passing as f64 / grades.len() as f64 * 100.0)
}

/// Counts grades per rounded integer bucket 1..=10.
///
/// All ten buckets are present. Values round half away from zero, and
/// anything outside the grade domain lands in the nearest end bucket so
/// the counts always add up to `grades.len()`.
pub fn distribution(grades: &[Grade]) -> BTreeMap<u8, usize> {
    let mut buckets: BTreeMap<u8, usize> = (1..=10).map(|b| (b, 0)).collect();
    for g in grades {
        let bucket = g.grade.round().clamp(1.0, 10.0) as u8;
        *buckets.entry(bucket).or_default() += 1;
    }
    buckets
}

/// Weighted average per calendar month, oldest month first.
pub fn monthly_average(grades: &[Grade]) -> Vec<MonthlyAverage> {
    let mut months: BTreeMap<NaiveDate, WeightedTotals> = BTreeMap::new();

    for g in grades {
        let Some(month) = g.test_date.with_day(1) else {
            continue;
        };
        months.entry(month).or_default().add(g.grade, g.weight);
    }

    months
        .into_iter()
        .filter_map(|(month, totals)| {
            totals.average().map(|average| MonthlyAverage {
                label: month_label(month),
                month,
                average,
            })
        })
        .collect()
}

/// Chart label for a month, e.g. `mrt 24`.
pub fn month_label(month: NaiveDate) -> String {
    format!("{} {}", MONTHS_NL[month.month0() as usize], month.format("%y"))
}

pub fn highest(grades: &[Grade]) -> Option<f64> {
    grades.iter().map(|g| g.grade).reduce(f64::max)
}

pub fn lowest(grades: &[Grade]) -> Option<f64> {
    grades.iter().map(|g| g.grade).reduce(f64::min)
}

/// Grades in date order, numbered from 1, labelled by `label`.
/// Grades on the same date keep their input order.
pub fn timeline<F>(grades: &[Grade], label: F) -> Vec<TimelinePoint>
where
    F: Fn(&Grade) -> String,
{
    let mut sorted: Vec<&Grade> = grades.iter().collect();
    sorted.sort_by_key(|g| g.test_date);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, g)| TimelinePoint {
            index: i + 1,
            grade: g.grade,
            date: g.test_date,
            label: label(g),
        })
        .collect()
}

/// The `count` most recent grades, newest first.
pub fn latest(grades: &[Grade], count: usize) -> Vec<Grade> {
    let mut sorted: Vec<&Grade> = grades.iter().collect();
    sorted.sort_by(|a, b| b.test_date.cmp(&a.test_date));
    sorted.into_iter().take(count).cloned().collect()
}
