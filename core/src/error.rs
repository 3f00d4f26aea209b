//! Error types.
//!
//! # Design
//! None of these escape `RequestExecutor::execute`: build and transport
//! errors are folded into `ResponseOutcome::NetworkFailure` there. They are
//! public for the sans-IO entry points and for `Transport` implementors.
//! `RequestError` is the `Err` side of `ResponseOutcome::into_result`.

use crate::outcome::NetworkErrorKind;

/// The request could not be turned into an `HttpRequest`.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("request url is empty")]
    MissingUrl,

    #[error("body serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The transport failed before a complete response was read.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request was aborted: {0}")]
    Aborted(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// A non-successful outcome in `Result` form.
#[derive(Debug, thiserror::Error)]
pub enum RequestError<E> {
    #[error("server responded with status {status_code}")]
    Application { status_code: u16, error_data: E },

    #[error("network failure ({kind:?}){}", status_suffix(.status_code))]
    Network {
        status_code: Option<u16>,
        kind: NetworkErrorKind,
    },
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map(|s| format!(", status {s}")).unwrap_or_default()
}
