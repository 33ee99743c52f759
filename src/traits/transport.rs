//! HTTP transport trait abstraction.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::Request;

/// Result of one send.
///
/// `error` is set only when no HTTP status was obtained; a 4xx/5xx
/// response is a successful exchange.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Exchange {
    pub status_code: u16,
    pub duration_ms: u64,
    pub body: String,
    pub error: Option<TransportError>,
}

impl Exchange {
    pub fn failed(error: TransportError, duration_ms: u64) -> Self {
        Self {
            status_code: 0,
            duration_ms,
            body: String::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Error text as stored in the history log; empty on success.
    pub fn error_text(&self) -> String {
        self.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
    }
}

/// Sends a saved request and reports what came back.
///
/// Implementations resolve auth secrets themselves at call time.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Exchange;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_exchange() {
        let ex = Exchange::failed(
            TransportError::Timeout {
                url: "http://x".into(),
                duration_secs: 1,
            },
            1000,
        );
        assert!(!ex.is_success());
        assert_eq!(ex.status_code, 0);
        assert_eq!(ex.error_text(), "timed out after 1s");
    }

    #[test]
    fn test_success_error_text_empty() {
        let ex = Exchange {
            status_code: 404,
            ..Exchange::default()
        };
        assert!(ex.is_success());
        assert_eq!(ex.error_text(), "");
    }
}
