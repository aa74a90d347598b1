use chrono::{TimeZone, Utc};
use jira_tempo::models::worklog::Worklog;
use jira_tempo::models::WorklogResource;
use jira_tempo::{Credentials, JiraError, JiraHttpClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> JiraHttpClient {
    let _ = env_logger::builder().is_test(true).try_init();
    JiraHttpClient::new(
        server.url(),
        Credentials::Basic("foo@example.com".to_string(), "token".to_string()),
    )
    .unwrap()
}

fn worklog_body(id: &str) -> serde_json::Value {
    json!({
        "self": format!("http://jira/rest/api/3/issue/10002/worklog/{id}"),
        "id": id,
        "author": {
            "self": "http://jira/rest/api/3/user?username=alice",
            "name": "alice",
            "displayName": "Alice A"
        },
        "comment": "fixed bug",
        "created": "2024-02-01T11:00:00.000+0000",
        "updated": "2024-02-01T11:00:00.000+0000",
        "started": "2024-02-01T10:00:00.000+0000",
        "timeSpent": "1h",
        "timeSpentSeconds": 3600
    })
}

#[test]
fn get_deserialises_a_native_work_log() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/3/issue/PROJ-1/worklog/10101")
        .with_status(200)
        .with_body(worklog_body("10101").to_string())
        .create();

    let client = client_for(&server);
    let worklog = Worklog::get(&client, "PROJ-1", "10101").unwrap();

    mock.assert();
    assert_eq!(worklog.id.as_deref(), Some("10101"));
    assert_eq!(worklog.time_spent_seconds, 3600);
    assert_eq!(
        worklog.started.unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(worklog.author.unwrap().name.as_deref(), Some("alice"));
}

#[test]
fn get_rejects_an_array_payload_as_malformed() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/rest/api/3/issue/PROJ-1/worklog/10101")
        .with_status(200)
        .with_body("[]")
        .create();

    let client = client_for(&server);
    let result = Worklog::get(&client, "PROJ-1", "10101");

    // Shape failures are distinct from transport failures.
    assert!(matches!(result, Err(JiraError::MalformedPayload(_))));
}

#[test]
fn get_wraps_transport_failures_with_context() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/rest/api/3/issue/PROJ-1/worklog/999")
        .with_status(404)
        .create();

    let client = client_for(&server);
    match Worklog::get(&client, "PROJ-1", "999") {
        Err(JiraError::Transport { context, .. }) => {
            assert!(context.contains("999"));
            assert!(context.contains("PROJ-1"));
        }
        other => panic!("expected a wrapped transport failure, got {other:?}"),
    }
}

#[test]
fn create_posts_a_minute_precision_utc_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rest/api/3/issue/PROJ-1/worklog")
        .match_body(Matcher::Json(json!({
            "comment": "fixed bug",
            "started": "2024-02-01T10:00Z",
            "timeSpentSeconds": 3600
        })))
        .with_status(201)
        .with_body(worklog_body("10102").to_string())
        .create();

    let client = client_for(&server);
    let started = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
    let worklog = Worklog::create(&client, "PROJ-1", "fixed bug", started, 3600).unwrap();

    mock.assert();
    assert_eq!(worklog.id.as_deref(), Some("10102"));
    assert_eq!(worklog.comment.as_deref(), Some("fixed bug"));
}

#[test]
fn create_fails_loudly_on_a_rejected_request() {
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/rest/api/3/issue/PROJ-1/worklog")
        .with_status(400)
        .with_body(r#"{"errorMessages": ["time spent is required"], "errors": {}}"#)
        .create();

    let client = client_for(&server);
    let started = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
    let result = Worklog::create(&client, "PROJ-1", "fixed bug", started, 0);

    match result {
        Err(JiraError::Transport { context, .. }) => assert!(context.contains("PROJ-1")),
        other => panic!("expected a wrapped transport failure, got {other:?}"),
    }
}

#[test]
fn api_revision_is_read_from_the_client_config() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/latest/issue/PROJ-1/worklog/10101")
        .with_status(200)
        .with_body(worklog_body("10101").to_string())
        .create();

    let client = JiraHttpClient::builder()
        .host(server.url())
        .basic_auth("foo@example.com", "token")
        .api_rev("latest")
        .build()
        .unwrap();
    let worklog = Worklog::get(&client, "PROJ-1", "10101").unwrap();

    mock.assert();
    assert_eq!(worklog.id.as_deref(), Some("10101"));
}
