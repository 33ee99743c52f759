//! Run history records and the last-response slot.

use super::request::Request;

/// One recorded send, as stored in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub id: i64,
    pub request_id: String,
    pub request_name: String,
    pub method: String,
    pub url: String,
    /// 0 when no status was obtained.
    pub status_code: u16,
    pub duration_ms: u64,
    /// Empty on success.
    pub error: String,
    pub created_at: String,
    pub request_snapshot: String,
    pub response_body: String,
}

/// A run about to be appended; the log assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewRun {
    pub request_id: String,
    pub request_name: String,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: String,
    pub created_at: String,
    pub request_snapshot: String,
    pub response_body: String,
}

impl NewRun {
    pub fn from_request(request: &Request, created_at: impl Into<String>) -> Self {
        Self {
            request_id: request.id.clone(),
            request_name: request.name.clone(),
            method: request.method.clone(),
            url: request.url.clone(),
            created_at: created_at.into(),
            request_snapshot: request.snapshot_text(),
            ..Self::default()
        }
    }
}

/// Value of `prefix` on the first snapshot line that carries it, stopping at `body:`.
fn snapshot_value<'a>(snapshot: &'a str, prefix: &str) -> Option<&'a str> {
    snapshot
        .split(['\n', '\r'])
        .take_while(|line| *line != "body:")
        .find_map(|line| line.strip_prefix(prefix))
}

/// Text following the `body:` line, or `None` when the snapshot has no body marker.
fn snapshot_body(snapshot: &str) -> Option<&str> {
    let mut offset = 0;
    for line in snapshot.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        offset += line.len();
        if bare == "body:" {
            return Some(snapshot[offset..].trim_start_matches(['\n', '\r']));
        }
    }
    None
}

fn snapshot_field<'a>(snapshot: &'a str, prefix: &str) -> &'a str {
    snapshot_value(snapshot, prefix).unwrap_or("")
}

fn is_meaningful(value: &str) -> bool {
    !value.is_empty() && value != "none" && value != "(none)"
}

impl Run {
    /// Text shown in the history detail pane.
    pub fn detail_text(&self) -> String {
        let snapshot = self.request_snapshot.as_str();
        let has_snapshot = !snapshot.is_empty();

        let method = Some(snapshot_field(snapshot, "method: "))
            .filter(|m| !m.is_empty())
            .unwrap_or(self.method.as_str());
        let url = Some(snapshot_field(snapshot, "url: "))
            .filter(|u| !u.is_empty())
            .unwrap_or(self.url.as_str());

        let request_body = if !has_snapshot {
            "(request snapshot unavailable for this run)"
        } else {
            match snapshot_body(snapshot) {
                Some("") => "(empty)",
                Some(body) => body,
                None => "(request body unavailable for this run)",
            }
        };

        let mut text = String::from("Request\n");
        text.push_str(&format!("method: {}\n", method));
        text.push_str(&format!("url: {}\n", url));
        for (label, prefix) in [
            ("auth", "auth: "),
            ("secret_ref", "secret_ref: "),
            ("auth_key_name", "auth_key_name: "),
            ("auth_location", "auth_location: "),
            ("auth_username", "auth_username: "),
            ("header", "header: "),
        ] {
            let v = snapshot_field(snapshot, prefix);
            if is_meaningful(v) {
                text.push_str(&format!("{}: {}\n", label, v));
            }
        }
        text.push_str(&format!("body:\n{}\n\n", request_body));

        let error = if self.error.is_empty() {
            "none"
        } else {
            self.error.as_str()
        };
        let response_body = if self.response_body.is_empty() {
            "(empty)"
        } else {
            self.response_body.as_str()
        };
        text.push_str("Response\n");
        text.push_str(&format!("error: {}\n", error));
        text.push_str(&format!("body:\n{}", response_body));
        text
    }
}

/// Outcome of the most recent send, shown in the response pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LastResponse {
    pub request_id: String,
    pub request_name: String,
    pub method: String,
    pub url: String,
    pub at: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_snapshot(snapshot: &str) -> Run {
        Run {
            id: 1,
            request_id: "r1".into(),
            request_name: "Users".into(),
            method: "GET".into(),
            url: "http://fallback".into(),
            status_code: 200,
            duration_ms: 12,
            created_at: "2025-01-01T00:00:00Z".into(),
            request_snapshot: snapshot.into(),
            response_body: "[1,2]".into(),
            ..Run::default()
        }
    }

    #[test]
    fn test_detail_from_full_snapshot() {
        let req = Request {
            name: "Users".into(),
            method: "POST".into(),
            url: "https://api/users".into(),
            auth_type: "bearer".into(),
            auth_secret_ref: "tok".into(),
            header_key: "X-Trace".into(),
            header_value: "1".into(),
            body: "{\"a\":1}".into(),
            ..Request::new()
        };
        let run = run_with_snapshot(&req.snapshot_text());

        assert_eq!(
            run.detail_text(),
            "Request\nmethod: POST\nurl: https://api/users\nauth: bearer\nsecret_ref: tok\nheader: X-Trace: 1\nbody:\n{\"a\":1}\n\nResponse\nerror: none\nbody:\n[1,2]"
        );
    }

    #[test]
    fn test_detail_skips_placeholder_values() {
        let run = run_with_snapshot(&Request::new().snapshot_text());
        let text = run.detail_text();
        assert!(!text.contains("auth:"));
        assert!(!text.contains("secret_ref:"));
        assert!(!text.contains("header:"));
        assert!(text.contains("body:\n(empty)\n\nResponse"));
    }

    #[test]
    fn test_detail_without_snapshot() {
        let mut run = run_with_snapshot("");
        run.error = "timed out after 30s".into();
        run.response_body.clear();

        assert_eq!(
            run.detail_text(),
            "Request\nmethod: GET\nurl: http://fallback\nbody:\n(request snapshot unavailable for this run)\n\nResponse\nerror: timed out after 30s\nbody:\n(empty)"
        );
    }

    #[test]
    fn test_detail_snapshot_without_body_marker() {
        let run = run_with_snapshot("method: PUT\nurl: http://x");
        let text = run.detail_text();
        assert!(text.contains("method: PUT\nurl: http://x\n"));
        assert!(text.contains("(request body unavailable for this run)"));
    }

    #[test]
    fn test_snapshot_value_stops_at_body() {
        let snap = "method: GET\nbody:\nauth: sneaky";
        assert_eq!(snapshot_value(snap, "method: "), Some("GET"));
        assert_eq!(snapshot_value(snap, "auth: "), None);
    }

    #[test]
    fn test_new_run_from_request() {
        let req = Request {
            name: "n".into(),
            url: "http://u".into(),
            ..Request::new()
        };
        let run = NewRun::from_request(&req, "2025-02-02T00:00:00Z");
        assert_eq!(run.request_id, req.id);
        assert_eq!(run.method, "GET");
        assert!(run.request_snapshot.starts_with("name: n\n"));
        assert_eq!(run.status_code, 0);
    }
}
