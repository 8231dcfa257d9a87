use grade_tracker::aggregator::grade::RequiredOutcome;
use grade_tracker::aggregator::report::{dashboard_report, required_grade_report, subject_report};
use grade_tracker::aggregator::{distribution, pass_rate, weighted_average, PASS_THRESHOLD};
use grade_tracker::model::Session;
use grade_tracker::source::{CsvSource, SnapshotSource};
use grade_tracker::validate::RequiredGradeQuery;

fn fixtures() -> CsvSource {
    CsvSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn session() -> Session {
    Session::Authenticated {
        user_id: "u1".to_string(),
    }
}

#[tokio::test]
async fn test_full_pipeline() {
    let snapshot = fixtures().load(&session()).await.expect("Failed to load fixtures");

    // Frans belongs to u2, g5 is orphaned, g6 belongs to u2
    assert_eq!(snapshot.subjects().len(), 3);
    assert_eq!(snapshot.grades().len(), 4);

    let report = dashboard_report(snapshot.subjects(), snapshot.grades());
    assert_eq!(report.grade_count, 4);
    assert_eq!(report.subjects.len(), 2);
    // Wiskunde 7.0, Engels 8.0; Biologie has no grades
    assert_eq!(report.overall_average, Some(7.5));
    assert_eq!(report.pass_rate, Some(100.0));
    assert_eq!(report.lowest, Some(6.0));
    assert_eq!(report.monthly.len(), 2);
    assert_eq!(report.distribution.values().sum::<usize>(), 4);
}

#[tokio::test]
async fn test_subject_and_required_grade() {
    let snapshot = fixtures().load(&session()).await.unwrap();
    let math = snapshot.subject("s-math").unwrap();

    let report = subject_report(math, snapshot.grades());
    assert_eq!(report.average, Some(7.0));
    assert_eq!(report.latest[0].id, "g2");
    assert_eq!(report.latest[1].description.as_deref(), Some("Hoofdstuk 1"));
    let target = report.target.unwrap();
    assert!(!target.met);

    let query = RequiredGradeQuery::new(8.0, 1.0).unwrap();
    let required = required_grade_report(math, snapshot.grades(), query);
    assert_eq!(required.required, 10.0);
    assert_eq!(required.outcome, RequiredOutcome::Achievable { passing: true });
}

#[tokio::test]
async fn test_aggregates_over_loaded_grades() {
    let snapshot = fixtures().load(&session()).await.unwrap();
    let english = snapshot.grades_for("s-eng");

    assert_eq!(weighted_average(&english), Some(8.0));
    assert_eq!(pass_rate(&english, PASS_THRESHOLD), Some(100.0));

    let dist = distribution(&english);
    assert_eq!(dist[&9], 1);
    assert_eq!(dist[&7], 1);
}

#[tokio::test]
async fn test_out_of_range_rows_never_reach_aggregation() {
    let source = CsvSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid"));
    let snapshot = source.load(&session()).await.unwrap();

    // Scheikunde has target 42, so it and its grade are dropped too
    assert_eq!(snapshot.subjects().len(), 1);
    assert_eq!(snapshot.subjects()[0].target_grade, Some(7.5));

    let ids: Vec<_> = snapshot.grades().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["g1"]);

    assert_eq!(weighted_average(snapshot.grades()), Some(7.5));
    let dist = distribution(snapshot.grades());
    assert_eq!(dist[&8], 1);
    assert_eq!(dist[&10], 0);
    assert_eq!(dist.values().sum::<usize>(), 1);
}

#[tokio::test]
async fn test_anonymous_session_loads_nothing() {
    let result = fixtures().load(&Session::Anonymous).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("not signed in"));
}
