use thiserror::Error;

/// Startup-level failures. Request-level failures live in `proxy::common::error`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bind error: {0}")]
    Bind(String),
}

// 启动阶段统一的 Result 别名
pub type AppResult<T> = Result<T, AppError>;
