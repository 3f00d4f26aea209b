use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const TEXT_BODY: &str = "non-JSON data";

/// What the server saw of an `/echo` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Echo {
    pub request_id: Uuid,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Echo {
    /// All values received for `name`, in arrival order.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/text", get(text))
        .route("/delay/{ms}", get(delay))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let echo = Echo {
        request_id: Uuid::new_v4(),
        method: method.to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
        body,
    };
    tracing::debug!(request_id = %echo.request_id, method = %echo.method, "echo");
    Json(echo)
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}

async fn text() -> &'static str {
    TEXT_BODY
}

async fn delay(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "delayed": ms }))
}
