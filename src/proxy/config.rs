use serde::{Deserialize, Serialize};

use crate::models::language::TARGET_LANGUAGES;

/// Anthropic Messages API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Credential sent as `x-api-key`. Empty means every request fails upstream.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    /// Value of the `anthropic-version` header.
    #[serde(default = "default_anthropic_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_anthropic_base_url(),
            model: default_anthropic_model(),
            api_version: default_anthropic_version(),
        }
    }
}

/// 上游代理配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// 是否启用
    pub enabled: bool,
    /// 代理地址 (http://, https://, socks5://)
    pub url: String,
}

/// A language enumerated in the ordered-list prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptLanguage {
    pub code: String,
    /// Korean label shown to the model.
    pub label: String,
}

impl PromptLanguage {
    fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// 转换服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// 是否允许局域网访问
    /// - false: 仅本机访问 127.0.0.1
    /// - true: 允许局域网访问 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Explicit bind host; wins over `allow_lan_access` when set.
    #[serde(default)]
    pub host: Option<String>,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 上游请求超时时间(秒)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Upper bound on `text` length in characters. `0` disables the check.
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,

    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Languages listed, in order, by the ordered-list prompt. This list is
    /// independent of the result table; see [`ServiceConfig::ordered_list_mismatch`].
    #[serde(default = "default_prompt_languages")]
    pub prompt_languages: Vec<PromptLanguage>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            host: None,
            port: default_port(),
            request_timeout: default_request_timeout(),
            max_text_chars: default_max_text_chars(),
            upstream_proxy: UpstreamProxyConfig::default(),
            anthropic: AnthropicConfig::default(),
            prompt_languages: default_prompt_languages(),
        }
    }
}

/// Codes that appear on only one side of the prompt-list / result-table pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMismatch {
    pub prompt_only: Vec<String>,
    pub table_only: Vec<String>,
}

impl LanguageMismatch {
    pub fn is_empty(&self) -> bool {
        self.prompt_only.is_empty() && self.table_only.is_empty()
    }
}

impl ServiceConfig {
    /// 获取实际的监听地址
    pub fn get_bind_address(&self) -> &str {
        if let Some(host) = self.host.as_deref().filter(|h| !h.trim().is_empty()) {
            return host;
        }
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    /// Compares the ordered-list prompt languages with the result table.
    ///
    /// The defaults disagree: German is requested from the model but has no
    /// result row. A non-empty mismatch is logged at startup, not rejected.
    pub fn ordered_list_mismatch(&self) -> LanguageMismatch {
        let prompt_only = self
            .prompt_languages
            .iter()
            .filter(|p| !TARGET_LANGUAGES.iter().any(|t| t.code.eq_ignore_ascii_case(&p.code)))
            .map(|p| p.code.clone())
            .collect();
        let table_only = TARGET_LANGUAGES
            .iter()
            .filter(|t| !self.prompt_languages.iter().any(|p| p.code.eq_ignore_ascii_case(t.code)))
            .map(|t| t.code.to_string())
            .collect();

        LanguageMismatch {
            prompt_only,
            table_only,
        }
    }
}

fn default_port() -> u16 {
    8045
}

fn default_request_timeout() -> u64 {
    120
}

fn default_max_text_chars() -> usize {
    2000
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

fn default_prompt_languages() -> Vec<PromptLanguage> {
    vec![
        PromptLanguage::new("en", "영어"),
        PromptLanguage::new("ja", "일본어"),
        PromptLanguage::new("vi", "베트남어"),
        PromptLanguage::new("th", "태국어"),
        PromptLanguage::new("de", "독일어"),
        PromptLanguage::new("es", "스페인어"),
        PromptLanguage::new("fr", "프랑스어"),
        PromptLanguage::new("it", "이탈리아어"),
        PromptLanguage::new("ko", "한국어"),
    ]
}
