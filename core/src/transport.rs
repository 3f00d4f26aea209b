//! The capability that actually performs HTTP calls.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. An implementation sends
//! the request and reads the whole body; it reports any failure before a
//! complete response as `TransportError`. Status codes are never errors at
//! this layer, 4xx and 5xx come back as ordinary `HttpResponse` values.
//!
//! The returned future is dropped when the executor's timer wins, so
//! implementations backed by a cancellable client abort the call for free.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::future::Future;

    use reqwest::{Client, Method};

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by a `reqwest::Client`.
    ///
    /// The client is used as given; timeouts configured on it still apply
    /// in addition to the executor's own timer.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl From<HttpMethod> for Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Patch => Method::PATCH,
                HttpMethod::Delete => Method::DELETE,
            }
        }
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else if err.is_timeout() || err.is_request() {
            TransportError::Aborted(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }

    impl Transport for ReqwestTransport {
        fn send(
            &self,
            request: HttpRequest,
        ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
            async move {
                let mut builder = self.client.request(request.method.into(), &request.url);
                // RequestBuilder::header appends, so repeated keys are preserved.
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                if let Some(body) = request.body {
                    builder = builder.body(body);
                }

                let response = builder.send().await.map_err(map_error)?;
                let status = response.status().as_u16();
                let headers = response
                    .headers()
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .to_str()
                            .ok()
                            .map(|v| (name.as_str().to_string(), v.to_string()))
                    })
                    .collect();
                let body = response.text().await.map_err(map_error)?;

                Ok(HttpResponse {
                    status,
                    headers,
                    body,
                })
            }
        }
    }
}
