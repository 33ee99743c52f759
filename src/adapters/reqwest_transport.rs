//! Reqwest-based transport adapter.
//!
//! Implements [`Transport`] on top of a shared `reqwest::Client`. Auth and
//! the custom header are applied by [`prepare_request`] before the call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{debug, info};

use crate::domain::{prepare_request, PreparedRequest};
use crate::error::{classify_reqwest_error, TransportError};
use crate::models::Request;
use crate::startup::config::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_RESPONSE_BYTES};
use crate::traits::{Exchange, SecretStore, Transport};

/// Transport sending requests with reqwest.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tuiman::adapters::{ReqwestTransport, mock::InMemorySecretStore};
/// use tuiman::traits::Transport;
///
/// let transport = ReqwestTransport::new(Arc::new(InMemorySecretStore::new()), 30, 1 << 20)?;
/// let exchange = transport.send(&request).await;
/// println!("{} in {}ms", exchange.status_code, exchange.duration_ms);
/// ```
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    secrets: Arc<dyn SecretStore>,
    timeout_secs: u64,
    max_body_bytes: usize,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("secrets", &self.secrets.backend_name())
            .field("timeout_secs", &self.timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl ReqwestTransport {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        timeout_secs: u64,
        max_body_bytes: usize,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("tuiman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::ClientInit {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            secrets,
            timeout_secs,
            max_body_bytes,
        })
    }

    /// Transport with the default timeout and body cap.
    pub fn with_defaults(secrets: Arc<dyn SecretStore>) -> Result<Self, TransportError> {
        Self::new(secrets, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_RESPONSE_BYTES)
    }

    fn build(&self, prepared: &PreparedRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let method = reqwest::Method::from_bytes(prepared.method.as_bytes()).map_err(|_| {
            TransportError::InvalidMethod {
                method: prepared.method.clone(),
            }
        })?;
        let url = reqwest::Url::parse(&prepared.url).map_err(|e| TransportError::InvalidUrl {
            url: prepared.url.clone(),
            message: e.to_string(),
        })?;

        let mut builder = self.client.request(method, url);
        for (name, value) in &prepared.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader { name: name.clone() })?;
            builder = builder.header(header_name, header_value);
        }
        if let Some((user, password)) = &prepared.basic_auth {
            builder = builder.basic_auth(user, Some(password));
        }
        if let Some(body) = &prepared.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }

    /// Read the body up to the cap, decoding lossily.
    async fn read_body(&self, mut response: reqwest::Response, url: &str) -> Result<String, TransportError> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| classify_reqwest_error(&e, url, self.timeout_secs))?
        {
            let room = self.max_body_bytes.saturating_sub(bytes.len());
            if chunk.len() > room {
                bytes.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        let mut body = String::from_utf8_lossy(&bytes).into_owned();
        if truncated {
            body.push_str(&truncation_marker(self.max_body_bytes));
        }
        Ok(body)
    }
}

/// Appended to a body cut at `limit` bytes.
pub fn truncation_marker(limit: usize) -> String {
    format!("\n... (response truncated at {} bytes)", limit)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> Exchange {
        let prepared = prepare_request(request, self.secrets.as_ref());
        let started = Instant::now();
        let elapsed_ms = |started: Instant| started.elapsed().as_millis() as u64;

        let builder = match self.build(&prepared) {
            Ok(builder) => builder,
            Err(e) => {
                debug!("Request {} rejected before send: {}", request.id, e);
                return Exchange::failed(e, 0);
            }
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = classify_reqwest_error(&e, &prepared.url, self.timeout_secs);
                return Exchange::failed(err, elapsed_ms(started));
            }
        };

        let status_code = response.status().as_u16();
        match self.read_body(response, &prepared.url).await {
            Ok(body) => {
                let duration_ms = elapsed_ms(started);
                info!(
                    "{} {} -> {} in {}ms",
                    prepared.method, prepared.url, status_code, duration_ms
                );
                Exchange {
                    status_code,
                    duration_ms,
                    body,
                    error: None,
                }
            }
            Err(err) => Exchange {
                status_code,
                ..Exchange::failed(err, elapsed_ms(started))
            },
        }
    }
}
