//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context attached to an error: what was being done and to which request.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Request id if the failure concerns a stored request.
    pub request_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Component where the error originated (e.g. "request_store").
    pub component: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            request_id: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Formatted context string suitable for log lines.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref request_id) = self.request_id {
            parts.push(format!("request_id={}", request_id));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " request={}", request_id)?;
        }

        Ok(())
    }
}
