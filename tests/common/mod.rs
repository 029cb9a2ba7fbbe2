#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use tokio::sync::{Mutex, Semaphore};

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: String,
    pub parts: Vec<ReceivedPart>,
}

impl ReceivedRequest {
    pub fn part(&self, name: &str) -> &ReceivedPart {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("request has no '{}' part", name))
    }

    pub fn product_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.part("product").bytes).expect("product part is JSON")
    }
}

#[derive(Clone)]
struct Backend {
    status: StatusCode,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

async fn create_product(
    State(backend): State<Backend>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field.bytes().await.unwrap().to_vec();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    backend.received.lock().await.push(ReceivedRequest {
        content_type,
        parts,
    });
    if let Some(gate) = &backend.gate {
        gate.acquire().await.unwrap().forget();
    }
    (backend.status, "{\"id\": 42, \"ignored\": true}")
}

/// Stand-in for the storefront backend's `POST /api/product`.
pub struct StubBackend {
    pub endpoint: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    gate: Option<Arc<Semaphore>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    pub async fn spawn(status: StatusCode) -> Self {
        Self::start(status, None).await
    }

    /// Like [`StubBackend::spawn`], but each response waits for a
    /// [`StubBackend::release`].
    pub async fn spawn_held(status: StatusCode) -> Self {
        Self::start(status, Some(Arc::new(Semaphore::new(0)))).await
    }

    async fn start(status: StatusCode, gate: Option<Arc<Semaphore>>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/api/product", post(create_product))
            .with_state(Backend {
                status,
                received: Arc::clone(&received),
                gate: gate.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}/api/product", addr),
            received,
            gate,
            handle,
        }
    }

    /// Lets one held response go out.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub async fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().await.clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An endpoint on a port nobody listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/product", addr)
}
