//! Request construction and response classification without I/O.
//!
//! # Design
//! The executor is a thin async shell around these two functions:
//! `build_request` turns a resolved config into an `HttpRequest`, and
//! `parse_response` turns an `HttpResponse` into a `ResponseOutcome`. Hosts
//! that perform their own I/O can call them directly and get the same
//! headers, body handling and classification as `RequestExecutor::execute`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::error::BuildError;
use crate::http::{HttpRequest, HttpResponse};
use crate::outcome::ResponseOutcome;

pub const JSON_MIME: &str = "application/json";

/// Build the `HttpRequest` described by `config`.
///
/// JSON defaults come first, then the caller's extra headers in order; no
/// header is deduplicated. The body is dropped for methods that do not
/// carry one.
pub fn build_request(config: &ResolvedConfig) -> Result<HttpRequest, BuildError> {
    if config.url.is_empty() {
        return Err(BuildError::MissingUrl);
    }

    let mut headers = Vec::with_capacity(config.extra_headers.len() + 2);
    if config.json_request {
        headers.push(("Content-Type".to_string(), JSON_MIME.to_string()));
    }
    if config.json_response {
        headers.push(("Accept".to_string(), JSON_MIME.to_string()));
    }
    headers.extend(
        config
            .extra_headers
            .iter()
            .map(|h| (h.key.clone(), h.value.clone())),
    );

    let body = match &config.body {
        Some(body) if config.method.carries_body() => Some(encode_body(body, config.json_request)?),
        _ => None,
    };

    Ok(HttpRequest {
        method: config.method,
        url: config.url.clone(),
        headers,
        body,
    })
}

/// Raw mode sends strings untouched; anything else has no wire form but its
/// JSON text.
fn encode_body(body: &Value, json: bool) -> Result<String, BuildError> {
    match body {
        Value::String(raw) if !json => Ok(raw.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}

/// Classify `response` against the validity window in `config`.
///
/// A body that cannot be decoded is a `NetworkFailure` with kind
/// `JsonParsing` whatever the status code, so a 2xx with a broken payload
/// never reaches `Success`.
pub fn parse_response<T, E>(config: &ResolvedConfig, response: HttpResponse) -> ResponseOutcome<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let status = response.status;
    let accepted = config.validity.accepts(status);
    debug!(status, accepted, "classifying response");

    if accepted {
        match decode_body::<T>(response.body, config.json_response) {
            Ok(data) => ResponseOutcome::Success {
                status_code: status,
                data,
            },
            Err(err) => {
                debug!(status, error = %err, "success body failed to decode");
                ResponseOutcome::json_parsing(status)
            }
        }
    } else {
        match decode_body::<E>(response.body, config.json_response) {
            Ok(error_data) => ResponseOutcome::ApplicationError {
                status_code: status,
                error_data,
            },
            Err(err) => {
                debug!(status, error = %err, "error body failed to decode");
                ResponseOutcome::json_parsing(status)
            }
        }
    }
}

/// Text mode hands the body over as a JSON string, so `String` and `Value`
/// targets both receive the raw text.
fn decode_body<D: DeserializeOwned>(body: String, json: bool) -> Result<D, serde_json::Error> {
    if json {
        serde_json::from_str(&body)
    } else {
        serde_json::from_value(Value::String(body))
    }
}
