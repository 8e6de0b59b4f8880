use chrono::NaiveDate;
use daybook_sources::code::{CodeClient, commit_count};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CodeClient {
    CodeClient::new(&server.uri(), "alice", SecretString::new("tok".into()))
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

fn commit(sha: &str, date: &str) -> serde_json::Value {
    serde_json::json!({"sha": sha, "commit": {"author": {"date": date}}})
}

#[tokio::test]
async fn commits_grouped_by_repository_full_name() {
    let server = MockServer::start().await;

    let repos = serde_json::json!([
        {"full_name": "alice/alpha"},
        {"full_name": "alice/beta"}
    ]);
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&repos))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/alpha/commits"))
        .and(query_param("author", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            commit("deadbeefcafe", "2023-01-10T09:30:00Z"),
            commit("0123456789ab", "2023-01-10T21:15:00Z"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/beta/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let record = client_for(&server).collect(day("2023-01-10")).await.expect("record");

    assert_eq!(record.len(), 1);
    let alpha = record["alice/alpha"].as_array().unwrap();
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[0]["sha"], "deadbee");
    assert_eq!(commit_count(&record), 2);
}

#[tokio::test]
async fn commits_outside_half_open_window_are_excluded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"full_name": "alice/alpha"}])),
        )
        .mount(&server)
        .await;
    // Upstream treats `until` as inclusive and may hand back a midnight
    // commit from the next day; the client must drop it.
    Mock::given(method("GET"))
        .and(path("/repos/alice/alpha/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            commit("aaaaaaa1111", "2023-01-10T23:59:59Z"),
            commit("bbbbbbb2222", "2023-01-11T00:00:00Z"),
            commit("ccccccc3333", "2023-01-09T23:59:59Z"),
        ])))
        .mount(&server)
        .await;

    let record = client_for(&server).collect(day("2023-01-10")).await.expect("record");
    let alpha = record["alice/alpha"].as_array().unwrap();
    assert_eq!(alpha.len(), 1);
    assert_eq!(alpha[0]["sha"], "aaaaaaa");
}

#[tokio::test]
async fn empty_repository_is_skipped_without_dropping_siblings() {
    let server = MockServer::start().await;

    let repos = serde_json::json!([
        {"full_name": "alice/bare"},
        {"full_name": "alice/alpha"}
    ]);
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&repos))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/bare/commits"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Git Repository is empty."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/alpha/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            commit("deadbeef000", "2023-01-10T12:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let record = client_for(&server).collect(day("2023-01-10")).await.expect("record");
    assert!(!record.contains_key("alice/bare"));
    assert_eq!(record["alice/alpha"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    client_for(&server).collect(day("2023-01-10")).await.expect("record");

    let received = server.received_requests().await.unwrap();
    assert!(!received.is_empty());
    let auth = received[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer tok");
}
