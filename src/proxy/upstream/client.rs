// 上游客户端实现
// 单次调用 Anthropic Messages API，不做重试

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tokio::time::Duration;

use crate::error::AppError;
use crate::proxy::config::{AnthropicConfig, UpstreamProxyConfig};
use crate::proxy::mappers::claude::models::{ContentBlock, Message, MessagesRequest, MessagesResponse};

const ERROR_SNIPPET_LIMIT: usize = 400;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

/// A single-turn completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

/// The one suspension point of every conversion request.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Vec<ContentBlock>, UpstreamError>;
}

pub struct AnthropicClient {
    http_client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(
        config: &AnthropicConfig,
        proxy_config: Option<UpstreamProxyConfig>,
        timeout_secs: u64,
    ) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(timeout_secs.max(5)));

        if let Some(proxy) = proxy_config {
            if proxy.enabled && !proxy.url.is_empty() {
                builder = builder.proxy(reqwest::Proxy::all(&proxy.url)?);
                tracing::info!("AnthropicClient enabled proxy: {}", proxy.url);
            }
        }

        Ok(Self {
            http_client: builder.build()?,
            config: config.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self) -> Result<header::HeaderMap, UpstreamError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(self.config.api_key.trim())
                .map_err(|e| UpstreamError::Decode(format!("invalid api key header: {}", e)))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_str(&self.config.api_version)
                .map_err(|e| UpstreamError::Decode(format!("invalid anthropic-version header: {}", e)))?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Vec<ContentBlock>, UpstreamError> {
        if self.config.api_key.trim().is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }

        let body = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![Message::user(request.prompt)],
        };

        let url = self.messages_url();
        tracing::debug!("Calling Anthropic | url: {} | max_tokens: {}", url, body.max_tokens);

        let resp = self
            .http_client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        // 先按文本读取，JSON 解析失败时也能保留错误信息
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: extract_error_message(status, &text),
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)
            .map_err(|e| UpstreamError::Decode(format!("Parse json failed: {}", e)))?;

        tracing::debug!(
            "✓ Anthropic replied | id: {} | model: {} | blocks: {} | stop: {:?}",
            parsed.id,
            parsed.model,
            parsed.content.len(),
            parsed.stop_reason
        );

        Ok(parsed.content)
    }
}

/// Pulls `error.message` (Anthropic shape) or `message` out of an error body,
/// falling back to a truncated raw body.
fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    if trimmed.chars().count() > ERROR_SNIPPET_LIMIT {
        let snippet: String = trimmed.chars().take(ERROR_SNIPPET_LIMIT).collect();
        format!("{}...", snippet)
    } else {
        trimmed.to_string()
    }
}
