//! In-process stub of the cloud RPC endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tplink_cloud::{Authenticator, ClientIdentity, CloudConfig, Credentials, Session};

/// One request as the stub received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
struct StubState {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A stub server answering by the `method` field of the request body.
pub struct StubServer {
    pub url: String,
    state: StubState,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new()
            .route("/", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Answer `method` with a 200 and the given envelope.
    pub fn reply(&self, method: &str, envelope: Value) -> &Self {
        self.reply_raw(method, StatusCode::OK, &envelope.to_string())
    }

    pub fn reply_raw(&self, method: &str, status: StatusCode, body: &str) -> &Self {
        self.state.replies.lock().unwrap().insert(
            method.to_string(),
            Reply {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    pub fn reply_after(&self, method: &str, delay: Duration, envelope: Value) -> &Self {
        self.state.replies.lock().unwrap().insert(
            method.to_string(),
            Reply {
                status: StatusCode::OK,
                body: envelope.to_string(),
                delay: Some(delay),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method() == method)
            .collect()
    }
}

async fn handle(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let method = body["method"].as_str().unwrap_or_default().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        query,
        headers,
        body,
    });

    let reply = state.replies.lock().unwrap().get(&method).cloned();
    let reply = reply.unwrap_or_else(|| Reply {
        status: StatusCode::OK,
        body: json!({ "error_code": -1, "msg": format!("unknown method {}", method) }).to_string(),
        delay: None,
    });

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// Deterministic identity for assertions.
pub fn test_identity() -> ClientIdentity {
    ClientIdentity::new()
        .with_term_id("00000000-0000-4000-8000-000000000001")
        .with_locale("en_GB")
        .with_user_agent("tplink-cloud-tests/1.0")
}

pub fn authenticator(server: &StubServer, identity: ClientIdentity) -> Authenticator {
    Authenticator::with_config(
        Credentials::new("u", "p"),
        identity,
        CloudConfig::new(&server.url),
    )
    .unwrap()
}

/// Log in against `server`, which must answer `login` with a token.
pub async fn login(server: &StubServer) -> Session {
    server.reply("login", json!({ "error_code": 0, "result": { "token": "T1" } }));
    authenticator(server, test_identity()).login().await.unwrap()
}
