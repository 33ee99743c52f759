//! End-to-end sends through the reqwest transport against a wiremock server.

mod common;

use std::sync::Arc;

use common::*;
use tempfile::TempDir;
use tuiman::adapters::ReqwestTransport;
use tuiman::app::{App, DraftField, Services};
use tuiman::storage::{HistoryLog, RequestStore};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// App sending over real HTTP, with secrets kept in memory.
fn http_app(dir: &TempDir, secrets: &InMemorySecretStore, max_body_bytes: usize) -> App {
    let secrets = Arc::new(secrets.clone());
    let transport = ReqwestTransport::new(secrets.clone(), 5, max_body_bytes).unwrap();
    let services = Services {
        requests: RequestStore::new(dir.path().join("requests")),
        history: HistoryLog::open_in_memory().unwrap(),
        transport: Arc::new(transport),
        secrets,
        editor: Box::new(MockEditor::new()),
        history_limit: 500,
    };
    let mut app = App::new(services);
    app.resize(100, 30);
    app
}

/// Jump to `field` and replace its value through insert mode.
async fn set_field(app: &mut App, field: DraftField, value: &str) {
    for _ in 0..DraftField::ALL.len() {
        press(app, key('k')).await;
    }
    for _ in 0..field.index() {
        press(app, key('j')).await;
    }
    press(app, key('i')).await;
    while !app.editor.as_ref().unwrap().input.is_empty() {
        press(app, backspace()).await;
    }
    type_text(app, value).await;
    press(app, enter()).await;
}

async fn send_selected(app: &mut App) {
    press(app, enter()).await;
    press(app, key('y')).await;
}

#[tokio::test]
async fn test_bearer_secret_set_in_editor_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"user\":\"ada\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let secrets = InMemorySecretStore::new();
    let mut app = http_app(&dir, &secrets, 1024);

    run_command(&mut app, &format!("new get {}/me", server.uri())).await;
    set_field(&mut app, DraftField::AuthType, "bearer").await;
    set_field(&mut app, DraftField::SecretRef, "me-token").await;
    run_command(&mut app, "secret tok-123").await;
    assert_eq!(app.status.text, "Secret stored in memory");
    run_command(&mut app, "w").await;
    assert_eq!(app.status.text, "Request saved");

    send_selected(&mut app).await;

    assert_eq!(app.status.text, "Request sent");
    let last = app.last_response.as_ref().unwrap();
    assert_eq!(last.status_code, 200);
    assert_eq!(last.body, "{\"user\":\"ada\"}");

    // The stored request and the run snapshot carry the reference only
    let stored = &app.requests[0];
    assert_eq!(stored.auth_secret_ref, "me-token");
    let run = &app.services.history.list(1).unwrap()[0];
    assert!(!run.request_snapshot.contains("tok-123"));
    assert!(run.request_snapshot.contains("secret_ref: me-token"));
}

#[tokio::test]
async fn test_api_key_in_query_and_custom_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .and(query_param("key", "k-9"))
        .and(header("x-trace", "abc"))
        .and(body_string("{\"a\":1}"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let secrets = InMemorySecretStore::new();
    secrets.insert("items-key", "k-9");
    let mut req = sample_request("Items", "POST", &format!("{}/items?page=2", server.uri()));
    req.auth_type = "api_key".to_string();
    req.auth_secret_ref = "items-key".to_string();
    req.auth_key_name = "key".to_string();
    req.auth_location = "query".to_string();
    req.header_key = "X-Trace".to_string();
    req.header_value = "abc".to_string();
    req.body = "{\"a\":1}".to_string();
    RequestStore::new(dir.path().join("requests")).save(&mut req).unwrap();

    let mut app = http_app(&dir, &secrets, 1024);
    send_selected(&mut app).await;

    assert_eq!(app.last_response.as_ref().unwrap().status_code, 201);
    // The stored URL is not rewritten by query auth
    assert_eq!(app.requests[0].url, format!("{}/items?page=2", server.uri()));
}

#[tokio::test]
async fn test_missing_secret_sends_without_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open"))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let secrets = InMemorySecretStore::new();
    let mut req = sample_request("Open", "GET", &format!("{}/open", server.uri()));
    req.auth_type = "bearer".to_string();
    req.auth_secret_ref = "never-stored".to_string();
    RequestStore::new(dir.path().join("requests")).save(&mut req).unwrap();

    let mut app = http_app(&dir, &secrets, 1024);
    send_selected(&mut app).await;

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
    assert_eq!(app.status.text, "Request sent");
    assert_eq!(app.last_response.as_ref().unwrap().body, "denied");
}

#[tokio::test]
async fn test_large_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(100)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut req = sample_request("Big", "GET", &format!("{}/big", server.uri()));
    RequestStore::new(dir.path().join("requests")).save(&mut req).unwrap();

    let mut app = http_app(&dir, &InMemorySecretStore::new(), 10);
    send_selected(&mut app).await;

    let body = &app.last_response.as_ref().unwrap().body;
    assert_eq!(
        body,
        &format!("{}{}", "x".repeat(10), tuiman::adapters::truncation_marker(10))
    );
}

#[tokio::test]
async fn test_invalid_url_is_a_failed_run() {
    let dir = TempDir::new().unwrap();
    let mut req = sample_request("Broken", "GET", "not a url");
    RequestStore::new(dir.path().join("requests")).save(&mut req).unwrap();

    let mut app = http_app(&dir, &InMemorySecretStore::new(), 1024);
    send_selected(&mut app).await;

    assert!(app.status.is_error);
    assert!(app.status.text.starts_with("Request failed: invalid url 'not a url'"));
    let run = &app.services.history.list(1).unwrap()[0];
    assert_eq!(run.status_code, 0);
    assert!(!run.error.is_empty());
}
