//! The core driven by a host-supplied blocking client.
//!
//! # Design
//! Wraps ureq in a `Transport` that runs each call on tokio's blocking pool,
//! and separately exercises `build_request` / `parse_response` with the host
//! doing the round-trip itself. Disables ureq's status-as-error behavior so
//! 4xx/5xx responses come back as data for the core to classify.

use std::future::Future;
use std::net::SocketAddr;

use request_core::{
    build_request, parse_response, HttpMethod, HttpRequest, HttpResponse, RequestConfig, RequestDefaults,
    RequestExecutor, ResponseOutcome, Transport, TransportError,
};
use serde_json::{json, Value};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key, value);
    }
    builder
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
fn round_trip(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = req.url.as_str();
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), &req.headers).call(),
        (HttpMethod::Delete, None) => with_headers(agent.delete(url), &req.headers).call(),
        (HttpMethod::Delete, Some(_)) => {
            return Err(TransportError::InvalidRequest(
                "DELETE bodies are not sent by this transport".to_string(),
            ))
        }
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), &req.headers).send(body.as_bytes()),
        (HttpMethod::Post, None) => with_headers(agent.post(url), &req.headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), &req.headers).send(body.as_bytes()),
        (HttpMethod::Put, None) => with_headers(agent.put(url), &req.headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => with_headers(agent.patch(url), &req.headers).send(body.as_bytes()),
        (HttpMethod::Patch, None) => with_headers(agent.patch(url), &req.headers).send_empty(),
    };
    let mut response = result.map_err(|e| TransportError::Connect(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::Body(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

struct UreqTransport {
    agent: ureq::Agent,
}

impl Transport for UreqTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || round_trip(&agent, request))
                .await
                .map_err(|e| TransportError::Aborted(e.to_string()))?
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn executor_over_blocking_transport() {
    let addr = start_server();
    let executor = RequestExecutor::new(UreqTransport { agent: agent() });

    let ok = executor
        .execute_value(RequestConfig::post(format!("http://{addr}/status/201")).body(json!({"a": 1})))
        .await;
    assert_eq!(
        ok,
        ResponseOutcome::Success {
            status_code: 201,
            data: json!({"status": 201})
        }
    );

    let failed = executor
        .execute_value(RequestConfig::get(format!("http://{addr}/status/500")))
        .await;
    assert_eq!(
        failed,
        ResponseOutcome::ApplicationError {
            status_code: 500,
            error_data: json!({"status": 500})
        }
    );

    let refused = executor
        .execute_value(
            RequestConfig::new(format!("http://{addr}/echo"))
                .method(HttpMethod::Delete)
                .body("x"),
        )
        .await;
    assert!(refused.is_network_failure());
    assert_eq!(refused.status_code(), None);
}

#[test]
fn sans_io_round_trip() {
    let addr = start_server();
    let agent = agent();
    let config = RequestConfig::new(format!("http://{addr}/echo"))
        .method(HttpMethod::Patch)
        .header("x-test", "1")
        .body(json!({"done": true}))
        .resolve(&RequestDefaults::default());

    let request = build_request(&config).unwrap();
    let response = round_trip(&agent, request).unwrap();
    let outcome: ResponseOutcome<Value, Value> = parse_response(&config, response);

    let echo = outcome.into_result().unwrap();
    assert_eq!(echo["method"], "PATCH");
    assert_eq!(echo["body"], r#"{"done":true}"#);
}

#[test]
fn sans_io_classifies_error_status() {
    let addr = start_server();
    let config = RequestConfig::get(format!("http://{addr}/status/404")).resolve(&RequestDefaults::default());

    let request = build_request(&config).unwrap();
    let response = round_trip(&agent(), request).unwrap();
    let outcome: ResponseOutcome<Value, Value> = parse_response(&config, response);

    assert_eq!(
        outcome,
        ResponseOutcome::ApplicationError {
            status_code: 404,
            error_data: json!({"status": 404})
        }
    );
}
