//! Integration tests for the request editor screen.

mod common;

use common::*;
use tuiman::app::{DraftField, EditorMode, PendingEdit, Screen, DEFAULT_MAIN_STATUS};

fn field(t: &TestApp) -> DraftField {
    t.app.editor.as_ref().map(|e| e.field).unwrap_or(DraftField::Name)
}

fn draft(t: &TestApp) -> &tuiman::models::Request {
    &t.app.editor.as_ref().unwrap().draft
}

async fn open_new(t: &mut TestApp, args: &str) {
    let line = format!("new {}", args);
    run_command(&mut t.app, line.trim_end()).await;
    assert_eq!(t.app.screen, Screen::Editor);
}

#[tokio::test]
async fn test_field_navigation() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;

    assert_eq!(field(&t), DraftField::Name);
    press(&mut t.app, key('k')).await;
    assert_eq!(field(&t), DraftField::Name);

    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('j')).await;
    assert_eq!(field(&t), DraftField::Url);

    for _ in 0..20 {
        press(&mut t.app, key('j')).await;
    }
    assert_eq!(field(&t), DraftField::AuthUsername);
}

#[tokio::test]
async fn test_method_cycles_with_wraparound() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;

    // h/l do nothing away from the Method field
    press(&mut t.app, key('l')).await;
    assert_eq!(draft(&t).method, "GET");

    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('l')).await;
    assert_eq!(draft(&t).method, "POST");
    press(&mut t.app, key('h')).await;
    press(&mut t.app, key('h')).await;
    assert_eq!(draft(&t).method, "DELETE");
}

#[tokio::test]
async fn test_unknown_method_cycles_from_get() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "options http://localhost/").await;
    assert_eq!(draft(&t).method, "OPTIONS");

    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('l')).await;
    assert_eq!(draft(&t).method, "POST");
}

#[tokio::test]
async fn test_unlisted_method_is_saved_verbatim() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "options http://localhost/").await;
    run_command(&mut t.app, "w").await;

    assert_eq!(t.app.status.text, "Request saved");
    let stored = t.app.services.requests.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].method, "OPTIONS");
}

#[tokio::test]
async fn test_method_field_refuses_insert() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('i')).await;

    assert_eq!(t.app.editor.as_ref().unwrap().mode, EditorMode::Normal);
    assert_eq!(t.app.status.text, "Method uses h/l cycle");
}

#[tokio::test]
async fn test_insert_edits_field_live() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "get http://localhost/").await;

    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('j')).await;
    press(&mut t.app, enter()).await;
    assert_eq!(t.app.editor.as_ref().unwrap().mode, EditorMode::Insert);
    assert_eq!(t.app.editor.as_ref().unwrap().input.as_str(), "http://localhost/");

    type_text(&mut t.app, "users").await;
    assert_eq!(draft(&t).url, "http://localhost/users");

    press(&mut t.app, backspace()).await;
    assert_eq!(draft(&t).url, "http://localhost/user");

    // Esc leaves insert mode and keeps what was typed
    press(&mut t.app, esc()).await;
    assert_eq!(t.app.editor.as_ref().unwrap().mode, EditorMode::Normal);
    assert_eq!(draft(&t).url, "http://localhost/user");
}

#[tokio::test]
async fn test_insert_mode_keys_are_text() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    press(&mut t.app, key('i')).await;
    press(&mut t.app, ctrl('w')).await;
    type_text(&mut t.app, "jk:e").await;
    press(&mut t.app, enter()).await;

    assert_eq!(draft(&t).name, "GET jk:e");
    assert_eq!(field(&t), DraftField::Name);
    assert!(t.app.pending_edit.is_none());
}

#[tokio::test]
async fn test_ctrl_s_saves_new_request() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "post http://localhost/items").await;
    let id = draft(&t).id.clone();

    press(&mut t.app, ctrl('s')).await;

    assert_eq!(t.app.screen, Screen::Main);
    assert!(t.app.editor.is_none());
    assert_eq!(t.app.status.text, "Request saved");
    assert_eq!(t.app.selected_request().unwrap().id, id);

    let stored = t.app.services.requests.load(&id).unwrap();
    assert_eq!(stored.method, "POST");
    assert_eq!(stored.name, "POST http://localhost/items");
    assert!(!stored.updated_at.is_empty());
}

#[tokio::test]
async fn test_save_requires_url() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    run_command(&mut t.app, "w").await;

    assert_eq!(t.app.screen, Screen::Editor);
    assert_eq!(t.app.status.text, "URL cannot be empty");
    assert!(t.app.status.is_error);
    assert!(t.app.services.requests.list().unwrap().is_empty());

    // Typing into the URL clears the error
    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('j')).await;
    press(&mut t.app, key('i')).await;
    type_text(&mut t.app, "h").await;
    assert!(t.app.status.is_empty());
}

#[tokio::test]
async fn test_save_fills_blank_name() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "put http://localhost/x").await;
    t.app.editor.as_mut().unwrap().draft.name.clear();

    run_command(&mut t.app, "wq").await;
    assert_eq!(t.app.status.text, "Request saved");
    assert_eq!(t.app.requests[0].name, "PUT http://localhost/x");
}

#[tokio::test]
async fn test_editing_existing_request_keeps_id() {
    let mut t = TestAppBuilder::new()
        .with_request(sample_request("Orig", "GET", "http://localhost/o"))
        .build();
    let id = t.app.requests[0].id.clone();

    press(&mut t.app, key('E')).await;
    press(&mut t.app, key('i')).await;
    type_text(&mut t.app, "inal").await;
    press(&mut t.app, enter()).await;
    press(&mut t.app, ctrl('s')).await;

    assert_eq!(t.app.requests.len(), 1);
    assert_eq!(t.app.requests[0].id, id);
    assert_eq!(t.app.requests[0].name, "Original");
}

#[tokio::test]
async fn test_cancel_discards_draft() {
    let mut t = TestAppBuilder::new()
        .with_request(sample_request("Orig", "GET", "http://localhost/o"))
        .build();

    press(&mut t.app, key('E')).await;
    press(&mut t.app, key('i')).await;
    type_text(&mut t.app, "-changed").await;
    press(&mut t.app, enter()).await;
    press(&mut t.app, esc()).await;

    assert_eq!(t.app.screen, Screen::Main);
    assert_eq!(t.app.status.text, "Draft cancelled");
    assert_eq!(t.app.requests[0].name, "Orig");
}

#[tokio::test]
async fn test_quit_command_restores_main_status() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "get http://localhost/").await;
    run_command(&mut t.app, "q").await;

    assert_eq!(t.app.screen, Screen::Main);
    assert!(t.app.running);
    assert_eq!(t.app.status.text, DEFAULT_MAIN_STATUS);
    assert!(t.app.requests.is_empty());
}

#[tokio::test]
async fn test_command_line_cancel() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    press(&mut t.app, key(':')).await;
    type_text(&mut t.app, "w").await;
    press(&mut t.app, esc()).await;

    assert_eq!(t.app.screen, Screen::Editor);
    let editor = t.app.editor.as_ref().unwrap();
    assert_eq!(editor.mode, EditorMode::Normal);
    assert!(editor.command.is_empty());
}

#[tokio::test]
async fn test_unknown_editor_command() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    run_command(&mut t.app, "x").await;
    assert_eq!(t.app.status.text, "Unknown editor command");
    assert!(t.app.status.is_error);
}

// ============================================================================
// Secrets
// ============================================================================

#[tokio::test]
async fn test_secret_requires_reference() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    run_command(&mut t.app, "secret hunter2").await;

    assert_eq!(t.app.status.text, "Set Secret Ref first");
    assert!(t.secrets.is_empty());
}

#[tokio::test]
async fn test_secret_stored_under_reference() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "get http://localhost/").await;
    t.app.editor.as_mut().unwrap().draft.auth_secret_ref = "api-token".to_string();

    run_command(&mut t.app, "secret  s3cr3t value").await;

    assert_eq!(t.app.status.text, "Secret stored in memory");
    assert_eq!(t.secrets.value("api-token").as_deref(), Some("s3cr3t value"));
    assert!(!draft(&t).snapshot_text().contains("s3cr3t"));
}

#[tokio::test]
async fn test_secret_without_value_shows_usage() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    t.app.editor.as_mut().unwrap().draft.auth_secret_ref = "api-token".to_string();

    run_command(&mut t.app, "secret").await;
    assert_eq!(t.app.status.text, "Usage: :secret VALUE");
    assert!(t.secrets.is_empty());
}

#[tokio::test]
async fn test_secret_store_failure() {
    let mut t = TestAppBuilder::new().build();
    t.secrets.set_fail_set(true);
    open_new(&mut t, "").await;
    t.app.editor.as_mut().unwrap().draft.auth_secret_ref = "api-token".to_string();

    run_command(&mut t.app, "secret value").await;
    assert_eq!(t.app.status.text, "Failed to store secret in memory");
    assert!(t.app.status.is_error);
}

// ============================================================================
// Draft body
// ============================================================================

#[tokio::test]
async fn test_draft_body_edit_formats_json() {
    let mut t = TestAppBuilder::new().build();
    t.editor.respond_with("[1,2]");
    open_new(&mut t, "post http://localhost/").await;

    press(&mut t.app, key('e')).await;
    assert_eq!(t.app.pending_edit, Some(PendingEdit::DraftBody));
    t.app.run_pending_edit();

    assert_eq!(draft(&t).body, "[\n  1,\n  2\n]");
    assert_eq!(t.app.status.text, "Draft body updated (JSON formatted)");
    assert_eq!(t.editor.calls()[0].suffix, ".json");
    // Nothing is persisted until the draft is saved
    assert!(t.app.services.requests.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_draft_body_invalid_json_keeps_draft() {
    let mut t = TestAppBuilder::new().build();
    t.editor.respond_with("{nope");
    open_new(&mut t, "post http://localhost/").await;

    press(&mut t.app, key('e')).await;
    t.app.run_pending_edit();

    assert!(draft(&t).body.is_empty());
    assert!(t.app.status.text.starts_with("Invalid JSON: "));
}

#[tokio::test]
async fn test_draft_body_scroll() {
    let mut t = TestAppBuilder::new().build();
    open_new(&mut t, "").await;
    press(&mut t.app, key('}')).await;
    press(&mut t.app, key('}')).await;
    press(&mut t.app, key('{')).await;
    assert_eq!(t.app.editor.as_ref().unwrap().body_scroll, 1);
}
