//! The async request executor.
//!
//! # Design
//! `execute` resolves the config once, builds the request, and races the
//! transport against `tokio::time::timeout`. The race resumes exactly once:
//! if the timer wins, the transport future is dropped on the spot, so a late
//! response has nowhere to be delivered. Every failure path ends in a
//! `ResponseOutcome`; nothing is returned as `Err` and nothing is retried.
//!
//! The executor holds no mutable state, so one instance may serve any number
//! of concurrent calls.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{build_request, parse_response};
use crate::config::{RequestConfig, RequestDefaults};
use crate::outcome::ResponseOutcome;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    transport: T,
    defaults: RequestDefaults,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_defaults(transport, RequestDefaults::default())
    }

    pub fn with_defaults(transport: T, defaults: RequestDefaults) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform the call described by `config` and classify the result.
    ///
    /// `D` is decoded from bodies whose status passes the validity window and
    /// `E` from all others. With `json_response` disabled the raw text is
    /// decoded as a JSON string, so use `String` or `Value` there.
    pub async fn execute<D, E>(&self, config: RequestConfig) -> ResponseOutcome<D, E>
    where
        D: DeserializeOwned,
        E: DeserializeOwned,
    {
        let config = config.resolve(&self.defaults);
        let request = match build_request(&config) {
            Ok(request) => request,
            Err(err) => {
                warn!(url = %config.url, error = %err, "could not build request");
                return ResponseOutcome::transport_failure();
            }
        };

        debug!(
            method = %request.method,
            url = %request.url,
            timeout_ms = config.timeout.as_millis() as u64,
            "sending request"
        );

        let response = match tokio::time::timeout(config.timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                debug!(url = %config.url, error = %err, "transport failed");
                return ResponseOutcome::transport_failure();
            }
            Err(_) => {
                debug!(url = %config.url, timeout_ms = config.timeout.as_millis() as u64, "request timed out");
                return ResponseOutcome::timeout();
            }
        };

        parse_response(&config, response)
    }

    /// `execute` with untyped JSON payloads on both sides.
    pub async fn execute_value(&self, config: RequestConfig) -> ResponseOutcome<Value, Value> {
        self.execute(config).await
    }
}

/// One-off call through `transport` with the stock defaults.
pub async fn execute<T, D, E>(transport: &T, config: RequestConfig) -> ResponseOutcome<D, E>
where
    T: Transport,
    D: DeserializeOwned,
    E: DeserializeOwned,
{
    RequestExecutor::new(transport).execute(config).await
}
