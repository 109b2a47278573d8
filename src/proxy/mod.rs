// proxy 模块 - Hangul 转换服务 (转发到 Anthropic)

pub mod config;
pub mod server;
pub mod pipeline;

pub mod mappers;           // 提示词与输出归一化
pub mod handlers;          // API 端点处理器
pub mod middleware;        // Axum 中间件
pub mod upstream;          // 上游客户端
pub mod common;            // 公共工具

pub use server::AxumServer;

#[cfg(test)]
pub mod tests;
