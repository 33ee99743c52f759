use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp format used for `updated_at`, run `created_at` and response `at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Current UTC time formatted with [`TIMESTAMP_FORMAT`].
pub fn utc_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// The methods the editor cycles through with h/l.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Step through [`Method::ALL`] with wraparound.
    ///
    /// A method outside the cycle (e.g. `OPTIONS`) is treated as `GET`
    /// before stepping.
    pub fn cycle(current: &str, delta: i32) -> Method {
        let index = Method::ALL
            .iter()
            .position(|m| m.as_str() == current)
            .unwrap_or(0) as i32;
        let len = Method::ALL.len() as i32;
        Method::ALL[(index + delta).rem_euclid(len) as usize]
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
            .ok_or(())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication scheme applied at send time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    Bearer,
    Jwt,
    ApiKey,
    Basic,
}

impl AuthType {
    /// Lenient parse of the stored auth type. Unknown values behave like `none`.
    pub fn parse(s: &str) -> AuthType {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => AuthType::Bearer,
            "jwt" => AuthType::Jwt,
            "api_key" | "apikey" | "api-key" => AuthType::ApiKey,
            "basic" => AuthType::Basic,
            _ => AuthType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::Bearer => "bearer",
            AuthType::Jwt => "jwt",
            AuthType::ApiKey => "api_key",
            AuthType::Basic => "basic",
        }
    }
}

/// Where an API key is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthLocation {
    #[default]
    Header,
    Query,
}

impl AuthLocation {
    pub fn parse(s: &str) -> AuthLocation {
        if s.trim().eq_ignore_ascii_case("query") {
            AuthLocation::Query
        } else {
            AuthLocation::Header
        }
    }
}

/// A saved HTTP request definition.
///
/// Every field is a plain string on disk; fields missing from a file take
/// their default value when read. Secret values never live here, only the
/// reference used to look them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "Request::blank")]
pub struct Request {
    pub id: String,
    pub name: String,
    pub method: String,
    pub url: String,
    pub header_key: String,
    pub header_value: String,
    pub body: String,
    pub auth_type: String,
    pub auth_secret_ref: String,
    pub auth_key_name: String,
    pub auth_location: String,
    pub auth_username: String,
    pub updated_at: String,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ..Self::blank()
        }
    }
}

impl Request {
    /// Field defaults for reading files; the id stays empty until
    /// [`Request::ensure_id`] runs.
    fn blank() -> Self {
        Self {
            id: String::new(),
            name: "New Request".to_string(),
            method: Method::Get.as_str().to_string(),
            url: String::new(),
            header_key: String::new(),
            header_value: String::new(),
            body: String::new(),
            auth_type: AuthType::None.as_str().to_string(),
            auth_secret_ref: String::new(),
            auth_key_name: String::new(),
            auth_location: String::new(),
            auth_username: String::new(),
            updated_at: String::new(),
        }
    }

    /// A fresh request with a new id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a new id if the stored one is blank or unsafe as a file name.
    pub fn ensure_id(&mut self) {
        if !is_safe_id(&self.id) {
            self.id = Uuid::new_v4().to_string();
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = utc_timestamp();
    }

    pub fn auth(&self) -> AuthType {
        AuthType::parse(&self.auth_type)
    }

    pub fn has_header(&self) -> bool {
        !self.header_key.is_empty() || !self.header_value.is_empty()
    }

    /// Point-in-time text snapshot stored with each run.
    pub fn snapshot_text(&self) -> String {
        fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
            if value.is_empty() {
                fallback
            } else {
                value
            }
        }

        let header = if self.has_header() {
            format!("{}: {}", self.header_key, self.header_value)
        } else {
            "none".to_string()
        };

        format!(
            "name: {}\nmethod: {}\nurl: {}\nauth: {}\nsecret_ref: {}\nauth_key_name: {}\nauth_location: {}\nauth_username: {}\nheader: {}\nbody:\n{}",
            or(&self.name, "(unnamed)"),
            self.method,
            self.url,
            or(&self.auth_type, "none"),
            or(&self.auth_secret_ref, "(none)"),
            or(&self.auth_key_name, "(none)"),
            or(&self.auth_location, "(none)"),
            or(&self.auth_username, "(none)"),
            header,
            or(&self.body, "(empty)"),
        )
    }
}

/// Ids name files in the request directory, so only ASCII letters, digits,
/// `-` and `_` are accepted.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Default name for a request: `"{METHOD} {URL}"`, or `"{METHOD} request"`
/// when no URL is set.
pub fn guess_name(method: &str, url: &str) -> String {
    if url.is_empty() {
        format!("{} request", method)
    } else {
        format!("{} {}", method, url)
    }
}
