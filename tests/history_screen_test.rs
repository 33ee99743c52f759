//! Integration tests for the history screen and replay.

mod common;

use common::*;
use tuiman::app::{Screen, DEFAULT_MAIN_STATUS};

async fn send_selected(t: &mut TestApp) {
    press(&mut t.app, enter()).await;
    press(&mut t.app, key('y')).await;
}

/// Two requests, each sent once: "First" then "Second".
async fn app_with_runs() -> TestApp {
    let transport = MockTransport::new();
    transport.push(exchange(200, "first body"));
    transport.push(exchange(500, "second body"));
    let mut t = TestAppBuilder::new()
        .with_request(sample_request("First", "GET", "http://localhost/1"))
        .with_request(sample_request("Second", "POST", "http://localhost/2"))
        .with_transport(transport)
        .build();

    send_selected(&mut t).await;
    press(&mut t.app, key('j')).await;
    send_selected(&mut t).await;
    t
}

#[tokio::test]
async fn test_empty_history() {
    let mut t = TestAppBuilder::new().build();
    run_command(&mut t.app, "history").await;

    assert_eq!(t.app.screen, Screen::History);
    assert!(t.app.runs.is_empty());
    assert!(t.app.selected_run().is_none());

    let rows = render_rows(&mut t.app);
    assert!(screen_contains(&rows, "No history yet"));
    assert!(screen_contains(&rows, "Send requests from main to populate history"));
}

#[tokio::test]
async fn test_runs_listed_newest_first() {
    let mut t = app_with_runs().await;
    run_command(&mut t.app, "history").await;

    assert_eq!(t.app.runs.len(), 2);
    assert_eq!(t.app.runs[0].request_name, "Second");
    assert_eq!(t.app.runs[0].status_code, 500);
    assert_eq!(t.app.runs[1].request_name, "First");
    assert_eq!(t.app.history_selected, 0);
    assert_eq!(t.app.status.text, DEFAULT_MAIN_STATUS);
}

#[tokio::test]
async fn test_history_selection_is_bounded() {
    let mut t = app_with_runs().await;
    run_command(&mut t.app, "history").await;

    press(&mut t.app, key('k')).await;
    assert_eq!(t.app.history_selected, 0);

    press(&mut t.app, key('}')).await;
    assert_eq!(t.app.history_detail_scroll, 1);

    press(&mut t.app, key('j')).await;
    assert_eq!(t.app.history_selected, 1);
    assert_eq!(t.app.history_detail_scroll, 0);

    press(&mut t.app, key('j')).await;
    assert_eq!(t.app.history_selected, 1);
    assert_eq!(t.app.selected_run().unwrap().request_name, "First");
}

#[tokio::test]
async fn test_history_limit() {
    let mut t = TestAppBuilder::new()
        .with_request(sample_request("Only", "GET", "http://localhost/"))
        .with_history_limit(2)
        .build();
    for _ in 0..3 {
        send_selected(&mut t).await;
    }

    run_command(&mut t.app, "history").await;
    assert_eq!(t.app.runs.len(), 2);
}

#[tokio::test]
async fn test_esc_returns_to_main() {
    let mut t = app_with_runs().await;
    run_command(&mut t.app, "history").await;
    press(&mut t.app, esc()).await;
    assert_eq!(t.app.screen, Screen::Main);
}

#[tokio::test]
async fn test_replay_sends_current_version() {
    let mut t = app_with_runs().await;

    // Change the stored request after it was run
    let mut first = t.app.requests[0].clone();
    first.url = "http://localhost/1?v=2".to_string();
    t.app.services.requests.save(&mut first).unwrap();

    run_command(&mut t.app, "history").await;
    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('r')).await;

    assert_eq!(t.app.screen, Screen::Main);
    assert_eq!(t.app.status.text, "Request sent");
    assert_eq!(t.transport.send_count(), 3);
    assert_eq!(t.transport.sent()[2].url, "http://localhost/1?v=2");
    assert_eq!(t.app.selected_request().unwrap().id, first.id);
    assert_eq!(t.app.services.history.list(10).unwrap().len(), 3);
}

#[tokio::test]
async fn test_replay_of_deleted_request_fails() {
    let mut t = app_with_runs().await;
    let second_id = t.app.requests[1].id.clone();
    t.app.services.requests.delete(&second_id).unwrap();

    run_command(&mut t.app, "history").await;
    press(&mut t.app, key('r')).await;

    assert_eq!(t.app.screen, Screen::History);
    assert_eq!(t.app.status.text, "Could not load request for replay");
    assert!(t.app.status.is_error);
    assert_eq!(t.transport.send_count(), 2);

    let rows = render_rows(&mut t.app);
    assert!(rows
        .last()
        .unwrap()
        .starts_with("HISTORY | Could not load request for replay"));
}

#[tokio::test]
async fn test_history_detail_rendered() {
    let mut t = app_with_runs().await;
    t.app.resize(140, 30);
    run_command(&mut t.app, "history").await;

    let rows = render_rows(&mut t.app);
    assert!(screen_contains(&rows, "Run Detail"));
    assert!(screen_contains(&rows, "Request + Response"));
    assert!(screen_contains(&rows, "second body"));
    assert!(rows.last().unwrap().starts_with("HISTORY | j/k move"));
}

#[tokio::test]
async fn test_history_resize_keys() {
    let mut t = app_with_runs().await;
    run_command(&mut t.app, "history").await;
    let before = t.app.ratios.split;

    press(&mut t.app, key('L')).await;
    assert!(t.app.ratios.split > before);
    assert_eq!(t.app.screen, Screen::History);
}
