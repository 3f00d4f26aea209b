//! Request configuration and default merging.
//!
//! # Design
//! `RequestConfig` is what the caller writes: every optional knob is an
//! `Option` so "not supplied" is distinguishable from "supplied with the
//! default value". `RequestConfig::resolve` merges it over `RequestDefaults`
//! exactly once, producing a `ResolvedConfig` with no optional knobs left.
//! Everything downstream of the merge works on the resolved form only.
//!
//! Both types deserialize with camelCase keys so request descriptions and
//! defaults can be loaded from JSON, TOML or any other serde format.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::HttpMethod;

pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

/// A caller-supplied header, appended after the default JSON headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraHeader {
    pub key: String,
    pub value: String,
}

impl ExtraHeader {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Inclusive range of status codes, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRange {
    pub start: u16,
    pub end: u16,
}

impl StatusRange {
    pub const SUCCESS: StatusRange = StatusRange { start: 200, end: 299 };

    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, status: u16) -> bool {
        (self.start..=self.end).contains(&status)
    }

    fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Default for StatusRange {
    fn default() -> Self {
        Self::SUCCESS
    }
}

/// The single rule deciding which status codes count as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Status must be one of the listed codes.
    Codes(Vec<u16>),
    /// Status must fall inside the inclusive range.
    Range(StatusRange),
}

impl StatusPolicy {
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            StatusPolicy::Codes(codes) => codes.contains(&status),
            StatusPolicy::Range(range) => range.contains(status),
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        StatusPolicy::Range(StatusRange::SUCCESS)
    }
}

/// Values used for every knob a `RequestConfig` leaves unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestDefaults {
    pub method: HttpMethod,
    pub json_request: bool,
    pub json_response: bool,
    #[serde(rename = "timeout")]
    pub timeout_ms: u64,
    pub valid_status_range: StatusRange,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            json_request: true,
            json_response: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            valid_status_range: StatusRange::SUCCESS,
        }
    }
}

/// Description of a single HTTP call.
///
/// When both `valid_status_codes` and `valid_status_range` are given, the
/// explicit code list wins. An empty list or an inverted range counts as not
/// supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_headers: Vec<ExtraHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_request: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_response: Option<bool>,
    #[serde(default, rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_status_codes: Option<Vec<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_status_range: Option<StatusRange>,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(HttpMethod::Get)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(HttpMethod::Post)
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push(ExtraHeader::new(key, value));
        self
    }

    pub fn json_request(mut self, enabled: bool) -> Self {
        self.json_request = Some(enabled);
        self
    }

    pub fn json_response(mut self, enabled: bool) -> Self {
        self.json_response = Some(enabled);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn valid_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.valid_status_codes = Some(codes.into_iter().collect());
        self
    }

    pub fn valid_status_range(mut self, start: u16, end: u16) -> Self {
        self.valid_status_range = Some(StatusRange::new(start, end));
        self
    }

    /// Merge this config over `defaults`, caller-supplied fields first.
    pub fn resolve(self, defaults: &RequestDefaults) -> ResolvedConfig {
        let validity = match (self.valid_status_codes, self.valid_status_range) {
            (Some(codes), _) if !codes.is_empty() => StatusPolicy::Codes(codes),
            (_, Some(range)) if !range.is_empty() => StatusPolicy::Range(range),
            _ => StatusPolicy::Range(defaults.valid_status_range),
        };
        let timeout_ms = self
            .timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.timeout_ms);

        ResolvedConfig {
            url: self.url,
            method: self.method.unwrap_or(defaults.method),
            body: self.body,
            extra_headers: self.extra_headers,
            json_request: self.json_request.unwrap_or(defaults.json_request),
            json_response: self.json_response.unwrap_or(defaults.json_response),
            timeout: Duration::from_millis(timeout_ms),
            validity,
        }
    }
}

/// A `RequestConfig` with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
    pub extra_headers: Vec<ExtraHeader>,
    pub json_request: bool,
    pub json_response: bool,
    pub timeout: Duration,
    pub validity: StatusPolicy,
}
