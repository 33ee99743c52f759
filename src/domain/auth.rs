//! Request preparation: custom header and auth application.
//!
//! [`prepare_request`] turns a stored [`Request`] into what goes on the wire.
//! It is pure apart from the secret lookup, so transports stay thin.

use tracing::debug;

use crate::models::{AuthLocation, AuthType, Request};
use crate::traits::SecretStore;

/// Header name used for API keys when none is configured.
pub const DEFAULT_API_KEY_NAME: &str = "X-API-Key";

/// A request ready to hand to an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Username and password for HTTP basic auth.
    pub basic_auth: Option<(String, String)>,
    /// `None` when the stored body is empty.
    pub body: Option<String>,
}

/// Apply the custom header and auth settings of `request`.
///
/// Auth is applied only when a secret reference is set and the store yields
/// a value for it; otherwise the request goes out without auth.
pub fn prepare_request(request: &Request, secrets: &dyn SecretStore) -> PreparedRequest {
    let method = match request.method.trim() {
        "" => "GET".to_string(),
        m => m.to_string(),
    };

    let mut prepared = PreparedRequest {
        method,
        url: request.url.clone(),
        headers: Vec::new(),
        basic_auth: None,
        body: if request.body.is_empty() {
            None
        } else {
            Some(request.body.clone())
        },
    };

    if !request.header_key.is_empty() {
        prepared
            .headers
            .push((request.header_key.clone(), request.header_value.clone()));
    }

    let auth = request.auth();
    if auth == AuthType::None || request.auth_secret_ref.is_empty() {
        return prepared;
    }

    let secret = match secrets.get(&request.auth_secret_ref) {
        Ok(secret) => secret,
        Err(e) => {
            debug!(
                reference = %request.auth_secret_ref,
                backend = secrets.backend_name(),
                error = %e,
                "secret unavailable, sending without auth"
            );
            return prepared;
        }
    };

    match auth {
        AuthType::Bearer | AuthType::Jwt => {
            prepared
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", secret)));
        }
        AuthType::ApiKey => {
            let key_name = if request.auth_key_name.is_empty() {
                DEFAULT_API_KEY_NAME
            } else {
                request.auth_key_name.as_str()
            };
            match AuthLocation::parse(&request.auth_location) {
                AuthLocation::Query => {
                    prepared.url = append_query_param(&prepared.url, key_name, &secret);
                }
                AuthLocation::Header => {
                    prepared.headers.push((key_name.to_string(), secret));
                }
            }
        }
        AuthType::Basic => {
            prepared.basic_auth = Some((request.auth_username.clone(), secret));
        }
        AuthType::None => {}
    }

    prepared
}

/// Append `key=value` using `&` when the URL already has a query string.
pub fn append_query_param(url: &str, key: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, sep, key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemorySecretStore;

    fn request(auth_type: &str, secret_ref: &str) -> Request {
        Request {
            url: "https://api.test/items".into(),
            auth_type: auth_type.into(),
            auth_secret_ref: secret_ref.into(),
            ..Request::new()
        }
    }

    fn store_with(reference: &str, value: &str) -> InMemorySecretStore {
        let store = InMemorySecretStore::new();
        store.insert(reference, value);
        store
    }

    #[test]
    fn test_plain_request() {
        let mut req = request("none", "");
        req.method = "post".into();
        req.body = "{}".into();
        let prepared = prepare_request(&req, &InMemorySecretStore::new());

        assert_eq!(prepared.method, "post");
        assert_eq!(prepared.url, "https://api.test/items");
        assert!(prepared.headers.is_empty());
        assert_eq!(prepared.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_empty_method_defaults_to_get() {
        let mut req = request("none", "");
        req.method = "  ".into();
        assert_eq!(prepare_request(&req, &InMemorySecretStore::new()).method, "GET");
    }

    #[test]
    fn test_custom_header_requires_key() {
        let mut req = request("none", "");
        req.header_value = "orphan".into();
        assert!(prepare_request(&req, &InMemorySecretStore::new()).headers.is_empty());

        req.header_key = "X-Trace".into();
        assert_eq!(
            prepare_request(&req, &InMemorySecretStore::new()).headers,
            vec![("X-Trace".to_string(), "orphan".to_string())]
        );
    }

    #[test]
    fn test_bearer_and_jwt() {
        let store = store_with("tok", "abc");
        for kind in ["bearer", "jwt"] {
            let prepared = prepare_request(&request(kind, "tok"), &store);
            assert_eq!(
                prepared.headers,
                vec![("Authorization".to_string(), "Bearer abc".to_string())]
            );
        }
    }

    #[test]
    fn test_api_key_header_default_name() {
        let store = store_with("k", "s3cr3t");
        let prepared = prepare_request(&request("api_key", "k"), &store);
        assert_eq!(
            prepared.headers,
            vec![("X-API-Key".to_string(), "s3cr3t".to_string())]
        );
        assert_eq!(prepared.url, "https://api.test/items");
    }

    #[test]
    fn test_api_key_query() {
        let store = store_with("k", "v");
        let mut req = request("api_key", "k");
        req.auth_key_name = "api_key".into();
        req.auth_location = "query".into();

        assert_eq!(
            prepare_request(&req, &store).url,
            "https://api.test/items?api_key=v"
        );

        req.url = "https://api.test/items?page=2".into();
        let prepared = prepare_request(&req, &store);
        assert_eq!(prepared.url, "https://api.test/items?page=2&api_key=v");
        assert!(prepared.headers.is_empty());
    }

    #[test]
    fn test_basic_auth() {
        let store = store_with("pw", "hunter2");
        let mut req = request("basic", "pw");
        req.auth_username = "alice".into();
        assert_eq!(
            prepare_request(&req, &store).basic_auth,
            Some(("alice".to_string(), "hunter2".to_string()))
        );
    }

    #[test]
    fn test_missing_secret_skips_auth() {
        let prepared = prepare_request(&request("bearer", "absent"), &InMemorySecretStore::new());
        assert!(prepared.headers.is_empty());
        assert!(prepared.basic_auth.is_none());
    }

    #[test]
    fn test_empty_reference_skips_auth() {
        let store = store_with("", "should-not-be-used");
        let prepared = prepare_request(&request("bearer", ""), &store);
        assert!(prepared.headers.is_empty());
    }

    #[test]
    fn test_append_query_param() {
        assert_eq!(append_query_param("http://h/p", "k", "v"), "http://h/p?k=v");
        assert_eq!(append_query_param("http://h/p?a=1", "k", "v"), "http://h/p?a=1&k=v");
    }
}
