//! Mock collaborators for integration tests.
//!
//! Re-exports the mocks from `tuiman::adapters::mock` and adds builders for
//! the exchanges they replay.

pub use tuiman::adapters::mock::{EditCall, InMemorySecretStore, MockEditor, MockTransport};
pub use tuiman::error::TransportError;
pub use tuiman::traits::Exchange;

/// A completed exchange with the given status and body.
pub fn exchange(status_code: u16, body: &str) -> Exchange {
    Exchange {
        status_code,
        duration_ms: 12,
        body: body.to_string(),
        error: None,
    }
}

/// An exchange that never got a status line.
pub fn connection_refused(url: &str) -> Exchange {
    Exchange::failed(
        TransportError::ConnectionFailed {
            url: url.to_string(),
            message: "connection refused".to_string(),
        },
        3,
    )
}
