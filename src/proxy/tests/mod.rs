
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::proxy::config::ServiceConfig;
use crate::proxy::mappers::claude::models::ContentBlock;
use crate::proxy::server::{build_router, AppState};
use crate::proxy::upstream::{CompletionClient, CompletionRequest, UpstreamError};

/// Completion client returning a canned reply and recording every call.
pub struct MockCompletion {
    reply: Result<Vec<ContentBlock>, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_blocks(vec![ContentBlock::Text {
            text: text.to_string(),
        }])
    }

    pub fn with_blocks(blocks: Vec<ContentBlock>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(blocks),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<Vec<ContentBlock>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.reply {
            Ok(blocks) => Ok(blocks.clone()),
            Err(message) => Err(UpstreamError::Status {
                status: 529,
                message: message.clone(),
            }),
        }
    }
}

pub fn app_with(mock: Arc<MockCompletion>) -> Router {
    app_with_config(ServiceConfig::default(), mock)
}

pub fn app_with_config(config: ServiceConfig, client: Arc<dyn CompletionClient>) -> Router {
    build_router(AppState::new(config, client))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

pub async fn send(app: Router, method: Method, path: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(app: Router, path: &str, body: &str) -> TestResponse {
    send(app, Method::POST, path, Some(body)).await
}
