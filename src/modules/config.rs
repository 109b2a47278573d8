use std::fs;

use crate::error::{AppError, AppResult};
use crate::proxy::config::ServiceConfig;

/// Env var pointing at an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "HANGUL_CONFIG";

/// 加载服务配置
///
/// Order: built-in defaults, then the JSON file named by `HANGUL_CONFIG`
/// (if any), then individual environment variables.
pub fn load_service_config() -> AppResult<ServiceConfig> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let content = fs::read_to_string(path.trim())?;
            parse_config(&content)?
        }
        _ => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    tracing::info!(
        "Config loaded | bind: {}:{} | model: {} | max_text_chars: {}",
        config.get_bind_address(),
        config.port,
        config.anthropic.model,
        config.max_text_chars
    );

    Ok(config)
}

pub fn parse_config(content: &str) -> AppResult<ServiceConfig> {
    serde_json::from_str(content).map_err(|e| AppError::Config(format!("解析配置文件失败: {}", e)))
}

/// Applies environment overrides through `lookup` so tests need not touch the process env.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("ANTHROPIC_API_KEY") {
        config.anthropic.api_key = key.trim().to_string();
    }
    if let Some(url) = get("ANTHROPIC_BASE_URL") {
        config.anthropic.base_url = url.trim().to_string();
    }
    if let Some(model) = get("ANTHROPIC_MODEL") {
        config.anthropic.model = model.trim().to_string();
    }
    if let Some(host) = get("HOST") {
        config.host = Some(host.trim().to_string());
    }
    if let Some(port) = get("PORT") {
        config.port = port
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid port number: {}", e)))?;
    }
    if let Some(flag) = get("ALLOW_LAN_ACCESS") {
        config.allow_lan_access = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
    }
    if let Some(limit) = get("MAX_TEXT_CHARS") {
        config.max_text_chars = limit
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("MAX_TEXT_CHARS must be a number: {}", e)))?;
    }

    Ok(())
}
