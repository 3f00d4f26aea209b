//! The tagged result of a request.
//!
//! # Design
//! Exactly one branch is ever populated, so callers branch on the variant
//! instead of probing optional fields. The serialized form keeps the
//! `status` tag (`OK`, `ERROR`, `NETWORK_ERROR`) that JavaScript and mobile
//! consumers of the same backend already switch on.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Status code reported for a request that lost the race against its timer.
pub const TIMEOUT_STATUS: u16 = 408;

/// Why a request produced no usable application response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkErrorKind {
    /// The timer elapsed before the transport settled.
    Timeout,
    /// A response arrived but its body was not the expected JSON.
    JsonParsing,
    /// The transport failed before producing a response.
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseOutcome<T, E> {
    /// The status code satisfied the validity window.
    #[serde(rename = "OK")]
    Success {
        #[serde(rename = "statusCode")]
        status_code: u16,
        data: T,
    },
    /// The server answered with a status outside the validity window.
    #[serde(rename = "ERROR")]
    ApplicationError {
        #[serde(rename = "statusCode")]
        status_code: u16,
        #[serde(rename = "errorData")]
        error_data: E,
    },
    #[serde(rename = "NETWORK_ERROR")]
    NetworkFailure {
        #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
        #[serde(rename = "networkError")]
        kind: NetworkErrorKind,
    },
}

impl<T, E> ResponseOutcome<T, E> {
    pub(crate) fn timeout() -> Self {
        ResponseOutcome::NetworkFailure {
            status_code: Some(TIMEOUT_STATUS),
            kind: NetworkErrorKind::Timeout,
        }
    }

    pub(crate) fn json_parsing(status: u16) -> Self {
        ResponseOutcome::NetworkFailure {
            status_code: Some(status),
            kind: NetworkErrorKind::JsonParsing,
        }
    }

    pub(crate) fn transport_failure() -> Self {
        ResponseOutcome::NetworkFailure {
            status_code: None,
            kind: NetworkErrorKind::Other,
        }
    }

    /// The status code, if one was received or synthesized.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ResponseOutcome::Success { status_code, .. }
            | ResponseOutcome::ApplicationError { status_code, .. } => Some(*status_code),
            ResponseOutcome::NetworkFailure { status_code, .. } => *status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success { .. })
    }

    pub fn is_network_failure(&self) -> bool {
        matches!(self, ResponseOutcome::NetworkFailure { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResponseOutcome::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> ResponseOutcome<U, E> {
        match self {
            ResponseOutcome::Success { status_code, data } => ResponseOutcome::Success {
                status_code,
                data: f(data),
            },
            ResponseOutcome::ApplicationError {
                status_code,
                error_data,
            } => ResponseOutcome::ApplicationError {
                status_code,
                error_data,
            },
            ResponseOutcome::NetworkFailure { status_code, kind } => {
                ResponseOutcome::NetworkFailure { status_code, kind }
            }
        }
    }

    /// Collapse the outcome into a `Result` for `?`-style call sites.
    pub fn into_result(self) -> Result<T, RequestError<E>> {
        match self {
            ResponseOutcome::Success { data, .. } => Ok(data),
            ResponseOutcome::ApplicationError {
                status_code,
                error_data,
            } => Err(RequestError::Application {
                status_code,
                error_data,
            }),
            ResponseOutcome::NetworkFailure { status_code, kind } => {
                Err(RequestError::Network { status_code, kind })
            }
        }
    }
}
