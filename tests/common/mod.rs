// Stub token endpoint for integration tests
// An axum router on a local listener that answers with canned responses
#![allow(dead_code)]

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const VULNERABLE_BODY: &str =
    r#"{"user_code": "ABC-123", "device_code": "d1", "verification_uri": "https://x", "interval": 5}"#;

/// A request received by the stub token endpoint.
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub headers: HeaderMap,
    pub form: HashMap<String, String>,
}

impl StubRequest {
    pub fn client_id(&self) -> &str {
        self.form.get("client_id").map(String::as_str).unwrap_or("")
    }

    pub fn header(&self, name: header::HeaderName) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

pub type Recorded = Arc<Mutex<Vec<StubRequest>>>;

type Handler = dyn Fn(&StubRequest) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    handler: Arc<Handler>,
    recorded: Recorded,
}

async fn token(
    State(state): State<StubState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let request = StubRequest { headers, form };
    let (status, body) = (state.handler)(&request);
    state.recorded.lock().unwrap().push(request);

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Start a stub that answers every token request with `handler(request)`.
/// Returns the base URL and the log of received requests.
pub async fn spawn_stub<F>(handler: F) -> (String, Recorded)
where
    F: Fn(&StubRequest) -> (u16, String) + Send + Sync + 'static,
{
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        handler: Arc::new(handler),
        recorded: recorded.clone(),
    };
    let app = Router::new()
        .route("/services/oauth2/token", post(token))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), recorded)
}

/// Same response for every client ID.
pub async fn spawn_fixed(status: u16, body: &str) -> (String, Recorded) {
    let body = body.to_string();
    spawn_stub(move |_| (status, body.clone())).await
}

/// Accepts connections and never answers.
pub async fn spawn_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
