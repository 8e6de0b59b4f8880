use chrono::NaiveDate;
use daybook_sources::SourceError;
use daybook_sources::activity::ActivityClient;
use daybook_sources::reading::ReadingClient;
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

#[tokio::test]
async fn activity_daily_summary_passes_through_upstream_schema() {
    let server = MockServer::start().await;

    let summary = serde_json::json!({
        "totalKilocalories": 2400,
        "totalSteps": 11000,
        "sleepingSeconds": 26000,
        "floorsAscended": 12
    });
    Mock::given(method("GET"))
        .and(path("/usersummary-service/usersummary/daily/user-token"))
        .and(query_param("calendarDate", "2023-01-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&summary))
        .mount(&server)
        .await;

    let client = ActivityClient::new(&server.uri(), SecretString::new("user-token".into()));
    let record = client.collect(day("2023-01-10")).await.expect("record");

    assert_eq!(record["totalSteps"], serde_json::json!(11000));
    // Unknown upstream fields survive untouched.
    assert_eq!(record["floorsAscended"], serde_json::json!(12));
}

#[tokio::test]
async fn activity_upstream_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = ActivityClient::new(&server.uri(), SecretString::new("user-token".into()));
    let err = client.collect(day("2023-01-10")).await.unwrap_err();
    match err {
        SourceError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn reading_status_fetches_fixed_book_with_api_key() {
    let server = MockServer::start().await;

    let book = serde_json::json!({"id": "book-1", "title": "Dune", "pages_read": 210});
    Mock::given(method("GET"))
        .and(path("/api/book/book-1"))
        .and(query_param("key", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&book))
        .mount(&server)
        .await;

    let client = ReadingClient::new(&server.uri(), SecretString::new("sekrit".into()), "book-1");
    let record = client.collect(day("2023-01-10")).await.expect("record");
    assert_eq!(record["title"], serde_json::json!("Dune"));
}
