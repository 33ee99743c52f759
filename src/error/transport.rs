//! Transport error types.
//!
//! A transport error means no HTTP status was obtained. A 4xx/5xx response is
//! not a transport error.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The URL could not be parsed.
    InvalidUrl { url: String, message: String },

    /// The method is not a valid HTTP token.
    InvalidMethod { method: String },

    /// Header key or value is not valid on the wire.
    InvalidHeader { name: String },

    /// Connection could not be established.
    ConnectionFailed { url: String, message: String },

    /// Hostname could not be resolved.
    DnsResolutionFailed { host: String },

    /// TLS handshake or certificate failure.
    Tls { message: String },

    /// No response within the configured timeout.
    Timeout { url: String, duration_secs: u64 },

    /// Too many redirects, or a redirect loop.
    Redirect { message: String },

    /// The response body could not be read.
    Body { message: String },

    /// The HTTP client could not be constructed.
    ClientInit { message: String },

    /// Anything else reported by the HTTP client.
    Other { message: String },
}

impl TransportError {
    pub fn user_message(&self) -> String {
        match self {
            TransportError::InvalidUrl { url, .. } => format!("Invalid URL: {}", url),
            TransportError::InvalidMethod { method } => format!("Invalid method: {}", method),
            TransportError::InvalidHeader { name } => format!("Invalid header: {}", name),
            TransportError::ConnectionFailed { url, .. } => {
                format!("Could not connect to {}", url)
            }
            TransportError::DnsResolutionFailed { host } => {
                format!("Could not resolve host {}", host)
            }
            TransportError::Tls { .. } => "TLS handshake failed".to_string(),
            TransportError::Timeout { duration_secs, .. } => {
                format!("Timed out after {}s", duration_secs)
            }
            TransportError::Redirect { .. } => "Too many redirects".to_string(),
            TransportError::Body { .. } => "Failed to read response body".to_string(),
            TransportError::ClientInit { .. } => "HTTP client unavailable".to_string(),
            TransportError::Other { message } => message.clone(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::InvalidUrl { .. } => "E_NET_URL",
            TransportError::InvalidMethod { .. } => "E_NET_METHOD",
            TransportError::InvalidHeader { .. } => "E_NET_HEADER",
            TransportError::ConnectionFailed { .. } => "E_NET_CONN",
            TransportError::DnsResolutionFailed { .. } => "E_NET_DNS",
            TransportError::Tls { .. } => "E_NET_TLS",
            TransportError::Timeout { .. } => "E_NET_TIMEOUT",
            TransportError::Redirect { .. } => "E_NET_REDIRECT",
            TransportError::Body { .. } => "E_NET_BODY",
            TransportError::ClientInit { .. } => "E_NET_INIT",
            TransportError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl { url, message } => {
                write!(f, "invalid url '{}': {}", url, message)
            }
            TransportError::InvalidMethod { method } => write!(f, "invalid method '{}'", method),
            TransportError::InvalidHeader { name } => write!(f, "invalid header '{}'", name),
            TransportError::ConnectionFailed { message, .. } => {
                write!(f, "connection failed: {}", message)
            }
            TransportError::DnsResolutionFailed { host } => {
                write!(f, "could not resolve host: {}", host)
            }
            TransportError::Tls { message } => write!(f, "tls error: {}", message),
            TransportError::Timeout { duration_secs, .. } => {
                write!(f, "timed out after {}s", duration_secs)
            }
            TransportError::Redirect { message } => write!(f, "redirect error: {}", message),
            TransportError::Body { message } => write!(f, "body read failed: {}", message),
            TransportError::ClientInit { message } => {
                write!(f, "http client init failed: {}", message)
            }
            TransportError::Other { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for TransportError {}

/// Classify a reqwest error into a TransportError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str, timeout_secs: u64) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
            duration_secs: timeout_secs,
        }
    } else if err.is_redirect() {
        TransportError::Redirect {
            message: err.to_string(),
        }
    } else if err.is_builder() {
        TransportError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::Body {
            message: err.to_string(),
        }
    } else {
        let err_str = format!("{:?}", err).to_lowercase();
        if err_str.contains("dns") || err_str.contains("failed to lookup") {
            TransportError::DnsResolutionFailed {
                host: extract_host_from_url(url),
            }
        } else if err_str.contains("tls") || err_str.contains("certificate") {
            TransportError::Tls {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            TransportError::Other {
                message: err.to_string(),
            }
        }
    }
}

/// Extract the host part of a URL for error messages.
fn extract_host_from_url(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}
