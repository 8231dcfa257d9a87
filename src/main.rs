//! CLI entry point for the grade tracker.
//!
//! Loads a user's subjects and grades from a local data directory or the
//! hosted backend and prints dashboard, subject, and required-grade reports.
//! New subjects and grades can be recorded in the local data directory.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use grade_tracker::aggregator::report::{dashboard_report, required_grade_report, subject_report};
use grade_tracker::config::{BackendConfig, USER_ID_VAR};
use grade_tracker::model::{NewGrade, NewSubject, Session, TestType};
use grade_tracker::output::{print_pretty, render_dashboard, render_required, render_subject, to_json};
use grade_tracker::source::{CsvSource, RestSource, Snapshot, SnapshotSource};
use grade_tracker::validate::RequiredGradeQuery;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_tracker")]
#[command(about = "Track weighted grades per subject", long_about = None)]
struct Cli {
    /// Directory holding subjects.csv and grades.csv
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: String,

    /// Read from the hosted backend instead of the data directory
    #[arg(long, default_value_t = false, global = true)]
    remote: bool,

    /// User whose records to load (defaults to GRADE_TRACKER_USER_ID)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics across all subjects
    Dashboard,
    /// Show statistics for one subject
    Subject {
        #[arg(value_name = "SUBJECT_ID")]
        subject_id: String,
    },
    /// Work out the grade needed on the next test to reach a target average
    Required {
        #[arg(short, long)]
        subject: String,

        /// Target average (1-10)
        #[arg(short, long)]
        target: f64,

        /// Weight of the next test
        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,
    },
    /// Record a new subject in the data directory
    AddSubject {
        #[arg(short, long)]
        name: String,

        /// Display color, e.g. "#3B82F6"
        #[arg(short, long)]
        color: Option<String>,

        /// Target average (1-10)
        #[arg(short, long)]
        target: Option<f64>,
    },
    /// Record a new grade in the data directory
    AddGrade {
        #[arg(short, long)]
        subject: String,

        /// Grade value (1-10)
        #[arg(short, long)]
        grade: f64,

        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,

        /// SO, PW, Toets, Mondeling, Presentatie, Praktijk or Overig
        #[arg(long, default_value_t = TestType::So)]
        test_type: TestType,

        #[arg(long)]
        description: Option<String>,

        /// Test date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_tracker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let session = Session::from_user_id(cli.user.clone().or_else(|| std::env::var(USER_ID_VAR).ok()));

    match cli.command {
        Commands::Dashboard => {
            let snapshot = load_snapshot(&cli.data_dir, cli.remote, &session).await?;
            let report = dashboard_report(snapshot.subjects(), snapshot.grades());
            print_pretty(&report);

            if cli.json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render_dashboard(&report));
            }
        }
        Commands::Subject { subject_id } => {
            let snapshot = load_snapshot(&cli.data_dir, cli.remote, &session).await?;
            let subject = snapshot
                .subject(&subject_id)
                .with_context(|| format!("unknown subject '{subject_id}'"))?;
            let report = subject_report(subject, snapshot.grades());

            if cli.json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render_subject(&report));
            }
        }
        Commands::Required {
            subject,
            target,
            weight,
        } => {
            let query = RequiredGradeQuery::new(target, weight)?;
            let snapshot = load_snapshot(&cli.data_dir, cli.remote, &session).await?;
            let subject = snapshot
                .subject(&subject)
                .with_context(|| format!("unknown subject '{subject}'"))?;
            let report = required_grade_report(subject, snapshot.grades(), query);

            info!(
                subject_id = %report.subject_id,
                required = report.required,
                "Required grade calculated"
            );

            if cli.json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render_required(&report));
            }
        }
        Commands::AddSubject {
            name,
            color,
            target,
        } => {
            let source = CsvSource::new(&cli.data_dir);
            let subject = source.append_subject(
                &session,
                NewSubject {
                    name,
                    color,
                    target_grade: target,
                },
            )?;
            println!("{}", subject.id);
        }
        Commands::AddGrade {
            subject,
            grade,
            weight,
            test_type,
            description,
            date,
        } => {
            let source = CsvSource::new(&cli.data_dir);
            let grade = source.append_grade(
                &session,
                NewGrade {
                    subject_id: subject,
                    grade,
                    weight,
                    test_type,
                    description,
                    test_date: date.unwrap_or_else(|| Local::now().date_naive()),
                },
            )?;
            println!("{}", grade.id);
        }
    }

    Ok(())
}

/// Loads the session's snapshot from the backend or the data directory.
async fn load_snapshot(data_dir: &str, remote: bool, session: &Session) -> Result<Snapshot> {
    if remote {
        let config = BackendConfig::from_env()?;
        RestSource::from_config(&config)?.load(session).await
    } else {
        CsvSource::new(data_dir).load(session).await
    }
}
