use grade_tracker::config::BackendConfig;
use grade_tracker::model::Session;
use grade_tracker::source::{RestSource, SnapshotSource};
use httpmock::prelude::*;

fn config(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: server.base_url(),
        api_key: "anon-key".to_string(),
        access_token: "user-jwt".to_string(),
    }
}

fn session() -> Session {
    Session::Authenticated {
        user_id: "u1".to_string(),
    }
}

#[tokio::test]
async fn test_rest_source_loads_owner_snapshot() {
    let server = MockServer::start();

    let subjects_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/subjects")
            .query_param("user_id", "eq.u1")
            .query_param("order", "name.asc")
            .header("apikey", "anon-key")
            .header("authorization", "Bearer user-jwt");
        then.status(200).json_body(serde_json::json!([
            { "id": "s1", "user_id": "u1", "name": "Wiskunde", "color": "#3B82F6", "target_grade": 7.5 },
            { "id": "s2", "user_id": "u1", "name": "Engels", "color": "#10B981", "target_grade": null }
        ]));
    });

    let grades_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/grades")
            .query_param("user_id", "eq.u1")
            .query_param("order", "test_date.desc")
            .header("apikey", "anon-key");
        then.status(200).json_body(serde_json::json!([
            {
                "id": "g1", "user_id": "u1", "subject_id": "s1", "grade": 8.0, "weight": 2.0,
                "test_type": "PW", "description": null, "test_date": "2024-03-01"
            },
            {
                "id": "g2", "user_id": "u1", "subject_id": "s-deleted", "grade": 3.0, "weight": 1.0,
                "test_type": "SO", "description": null, "test_date": "2024-02-01"
            }
        ]));
    });

    let source = RestSource::from_config(&config(&server)).unwrap();
    let snapshot = source.load(&session()).await.unwrap();

    subjects_mock.assert();
    grades_mock.assert();

    let names: Vec<_> = snapshot.subjects().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Engels", "Wiskunde"]);
    assert_eq!(snapshot.grades().len(), 1);
    assert_eq!(snapshot.grades()[0].id, "g1");
}

#[tokio::test]
async fn test_rest_source_surfaces_http_status() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/subjects");
        then.status(401).body("JWT expired");
    });
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/grades");
        then.status(200).json_body(serde_json::json!([]));
    });

    let source = RestSource::from_config(&config(&server)).unwrap();
    let err = source.load(&session()).await.unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("401"));
    assert!(message.contains("JWT expired"));
}

#[tokio::test]
async fn test_rest_source_requires_session() {
    let server = MockServer::start();
    let source = RestSource::from_config(&config(&server)).unwrap();

    assert!(source.load(&Session::Anonymous).await.is_err());
}

#[tokio::test]
async fn test_rest_source_drops_out_of_range_rows() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/subjects");
        then.status(200).json_body(serde_json::json!([
            { "id": "s1", "user_id": "u1", "name": "Wiskunde", "color": "#3B82F6", "target_grade": 7.0 },
            { "id": "s2", "user_id": "u1", "name": "Scheikunde", "color": "#8B5CF6", "target_grade": 42.0 }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/grades");
        then.status(200).json_body(serde_json::json!([
            { "id": "g1", "user_id": "u1", "subject_id": "s1", "grade": 6.5, "weight": 1.0,
              "test_type": "SO", "description": null, "test_date": "2024-03-01" },
            { "id": "g2", "user_id": "u1", "subject_id": "s1", "grade": 42.0, "weight": 1.0,
              "test_type": "SO", "description": null, "test_date": "2024-03-02" },
            { "id": "g3", "user_id": "u1", "subject_id": "s1", "grade": 7.0, "weight": -1.0,
              "test_type": "PW", "description": null, "test_date": "2024-03-03" },
            { "id": "g4", "user_id": "u1", "subject_id": "s1", "grade": 6.0, "weight": 0.0,
              "test_type": "PW", "description": null, "test_date": "2024-03-04" }
        ]));
    });

    let source = RestSource::from_config(&config(&server)).unwrap();
    let snapshot = source.load(&session()).await.unwrap();

    let names: Vec<_> = snapshot.subjects().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Wiskunde"]);
    let ids: Vec<_> = snapshot.grades().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["g1"]);
}
