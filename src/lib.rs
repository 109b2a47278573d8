mod models;
mod modules;
mod proxy; // 转换服务模块
pub mod error;

use std::sync::Arc;

use modules::logger;
use proxy::upstream::client::AnthropicClient;
use proxy::AxumServer;
use tracing::{error, info, warn};

pub use models::conversion::{ConversionOutput, ConversionRequest, ConversionResult};
pub use proxy::config::ServiceConfig;

/// Boots logging, loads configuration and serves until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    // 初始化日志 (guard 必须存活到进程结束，否则文件日志会丢失尾部)
    let _log_guard = logger::init_logger();

    let config = modules::config::load_service_config()?;

    if config.anthropic.api_key.trim().is_empty() {
        warn!("ANTHROPIC_API_KEY is not set; every conversion request will fail upstream");
    }

    let mismatch = config.ordered_list_mismatch();
    if !mismatch.is_empty() {
        warn!(
            "Ordered-list prompt languages differ from the result table | prompt only: {:?} | table only: {:?}",
            mismatch.prompt_only, mismatch.table_only
        );
    }

    let client = AnthropicClient::new(
        &config.anthropic,
        Some(config.upstream_proxy.clone()),
        config.request_timeout,
    )?;

    let (server, mut handle) = AxumServer::start(config, Arc::new(client)).await?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            server.stop();
            if let Err(e) = handle.await {
                error!("Server task ended abnormally: {}", e);
            }
        }
        res = &mut handle => {
            if let Err(e) = res {
                error!("Server task ended abnormally: {}", e);
            }
        }
    }

    Ok(())
}
