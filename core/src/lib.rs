//! Uniform, tagged results for HTTP calls.
//!
//! # Overview
//! `RequestExecutor::execute` takes a `RequestConfig`, sends it through an
//! injected `Transport` while racing a timer, and returns a
//! `ResponseOutcome`: `Success`, `ApplicationError` or `NetworkFailure`.
//! It never returns an error and never panics on a bad response.
//!
//! # Design
//! - Config merging happens once, up front (`RequestConfig::resolve`).
//! - Request building and response classification are plain functions
//!   (`build_request`, `parse_response`), so hosts that do their own I/O get
//!   identical behavior without the executor.
//! - The validity window is either a code list or an inclusive range; a
//!   non-empty code list always wins.
//! - A body that fails to decode is a `NetworkFailure` with kind
//!   `JsonParsing`, even when the status code was in the success window.
//!
//! ```no_run
//! # async fn run() {
//! use request_core::{RequestConfig, RequestExecutor, ReqwestTransport, ResponseOutcome};
//! use serde_json::Value;
//!
//! let executor = RequestExecutor::new(ReqwestTransport::new());
//! let outcome: ResponseOutcome<Value, Value> = executor
//!     .execute(RequestConfig::get("https://example.com/api/items"))
//!     .await;
//! match outcome {
//!     ResponseOutcome::Success { data, .. } => println!("{data}"),
//!     ResponseOutcome::ApplicationError { status_code, error_data } => {
//!         eprintln!("{status_code}: {error_data}")
//!     }
//!     ResponseOutcome::NetworkFailure { kind, .. } => eprintln!("network: {kind:?}"),
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod outcome;
pub mod transport;

pub use client::{build_request, parse_response};
pub use config::{ExtraHeader, RequestConfig, RequestDefaults, ResolvedConfig, StatusPolicy, StatusRange};
pub use error::{BuildError, RequestError, TransportError};
pub use executor::{execute, RequestExecutor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use outcome::{NetworkErrorKind, ResponseOutcome, TIMEOUT_STATUS};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
