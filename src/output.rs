//! Output formatting for reports.
//!
//! Supports pretty-printing to the debug log, JSON, and a plain-text summary.

use anyhow::Result;
use serde::Serialize;
use std::fmt::{Debug, Write};
use tracing::debug;

use crate::aggregator::grade::RequiredOutcome;
use crate::aggregator::types::{DashboardReport, RequiredGradeReport, SubjectReport};
use crate::aggregator::utility::format_one_decimal;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl Debug) {
    debug!("{:#?}", value);
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}%"),
        None => "--".to_string(),
    }
}

fn subject_count(n: usize) -> String {
    format!("{n} {}", if n == 1 { "vak" } else { "vakken" })
}

fn grade_count(n: usize) -> String {
    format!("{n} cijfer{}", if n == 1 { "" } else { "s" })
}

fn points(gap: f64) -> String {
    format!("{gap:.1} punt{}", if gap == 1.0 { "" } else { "en" })
}

pub fn render_dashboard(report: &DashboardReport) -> String {
    let mut out = String::new();
    if report.grade_count == 0 {
        out.push_str("Nog geen cijfers ingevoerd\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{}, {}",
        subject_count(report.subject_count),
        grade_count(report.grade_count)
    );
    let _ = writeln!(
        out,
        "Gemiddelde: {}  Hoogste: {}  Laagste: {}  Voldoendes: {}",
        format_one_decimal(report.overall_average),
        format_one_decimal(report.highest),
        format_one_decimal(report.lowest),
        percent(report.pass_rate),
    );

    for s in &report.subjects {
        let _ = writeln!(out, "  {:<20} {:.1}", s.name, s.average);
    }

    if !report.monthly.is_empty() {
        out.push_str("Per maand:\n");
        for m in &report.monthly {
            let _ = writeln!(out, "  {:<8} {:.1}", m.label, m.average);
        }
    }
    out
}

pub fn render_subject(report: &SubjectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})  Gemiddelde: {}",
        report.name,
        grade_count(report.grade_count),
        format_one_decimal(report.average)
    );
    if report.grade_count == 0 {
        return out;
    }

    let _ = writeln!(
        out,
        "Hoogste: {}  Laagste: {}  Voldoendes: {}",
        format_one_decimal(report.highest),
        format_one_decimal(report.lowest),
        percent(report.pass_rate),
    );

    if let Some(target) = &report.target {
        if target.met {
            let _ = writeln!(out, "Doel {:.1} bereikt", target.target);
        } else {
            let _ = writeln!(
                out,
                "Doel {:.1}: nog {} te gaan ({:.0}%)",
                target.target,
                points(target.gap),
                target.progress_percent
            );
        }
    }

    for g in &report.latest {
        let _ = writeln!(out, "  {}  {:>4}  {}", g.test_date, g.grade, g.test_type);
    }
    out
}

pub fn render_required(report: &RequiredGradeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: huidig gemiddelde {}, doel {:.1}, weging {}",
        report.name,
        format_one_decimal(report.current_average),
        report.target,
        report.next_weight
    );
    let verdict = match report.outcome {
        RequiredOutcome::NotAchievable => " (niet haalbaar)",
        RequiredOutcome::AlreadyAchieved => " (doel al bereikt)",
        RequiredOutcome::Achievable { passing: false } => " (onvoldoende volstaat)",
        RequiredOutcome::Achievable { passing: true } => "",
    };
    let _ = writeln!(out, "Benodigd cijfer: {:.1}{}", report.display, verdict);
    out
}
