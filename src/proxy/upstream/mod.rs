// 上游客户端
pub mod client;

pub use client::{CompletionClient, CompletionRequest, UpstreamError};
