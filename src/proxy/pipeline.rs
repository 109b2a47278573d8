// 转换管线
// Validate -> Build Prompt -> Call Remote -> Normalize -> Respond
// 四个端点共用同一条管线，只在提示词、token 预算和响应形状上有差异

use tracing::{info, warn};

use crate::models::conversion::{ConversionOutput, ConversionRequest, ConversionResult};
use crate::models::language::TARGET_LANGUAGES;
use crate::proxy::common::error::ApiError;
use crate::proxy::common::validation;
use crate::proxy::mappers::{normalizer, prompt};
use crate::proxy::server::AppState;
use crate::proxy::upstream::CompletionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Single-phrase transliteration into Hangul.
    Convert,
    /// English source, keyed reply for every table language.
    TranslateAll,
    /// Source language detected by the model, keyed reply.
    TranslateDetect,
    /// English source, ordered array reply.
    TranslateList,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Convert,
        Endpoint::TranslateAll,
        Endpoint::TranslateDetect,
        Endpoint::TranslateList,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Convert => "/api/convert",
            Endpoint::TranslateAll => "/api/translate-all",
            Endpoint::TranslateDetect => "/api/translate-detect",
            Endpoint::TranslateList => "/api/translate-list",
        }
    }

    /// Output token budget sent upstream.
    pub fn max_tokens(self) -> u32 {
        match self {
            Endpoint::Convert => 1000,
            Endpoint::TranslateAll => 2000,
            Endpoint::TranslateDetect => 2500,
            Endpoint::TranslateList => 3000,
        }
    }
}

/// Validated input plus the rendered prompt.
struct PreparedRequest {
    text: String,
    /// Request key of the source language (single-language endpoint only).
    language: Option<&'static str>,
    prompt: String,
}

fn prepare(state: &AppState, endpoint: Endpoint, request: ConversionRequest) -> Result<PreparedRequest, ApiError> {
    let max_chars = state.config.max_text_chars;

    match endpoint {
        Endpoint::Convert => {
            let (text, language) = validation::require_text_and_language(request, max_chars)?;
            let prompt = prompt::build_transliteration_prompt(language, &text);
            Ok(PreparedRequest {
                text,
                language: Some(language.key),
                prompt,
            })
        }
        Endpoint::TranslateAll | Endpoint::TranslateDetect | Endpoint::TranslateList => {
            let text = validation::require_text(request, max_chars)?;
            let prompt = match endpoint {
                Endpoint::TranslateAll => prompt::build_translate_all_prompt(&text, &TARGET_LANGUAGES),
                Endpoint::TranslateDetect => prompt::build_detect_prompt(&text, &TARGET_LANGUAGES),
                _ => prompt::build_ordered_list_prompt(
                    &text,
                    &state.config.prompt_languages,
                    TARGET_LANGUAGES.len(),
                ),
            };
            Ok(PreparedRequest {
                text,
                language: None,
                prompt,
            })
        }
    }
}

fn normalize(endpoint: Endpoint, language: Option<&'static str>, reply: String) -> Result<ConversionOutput, ApiError> {
    let output = match endpoint {
        Endpoint::Convert => ConversionOutput::Hangul {
            hangul: reply,
            language: language.unwrap_or_default().to_string(),
        },
        Endpoint::TranslateAll => ConversionOutput::Results {
            detected_language: None,
            results: normalizer::parse_keyed_translations(&reply, &TARGET_LANGUAGES)?,
        },
        Endpoint::TranslateDetect => {
            let (detected, results) = normalizer::parse_detected_translations(&reply, &TARGET_LANGUAGES)?;
            ConversionOutput::Results {
                detected_language: Some(detected),
                results,
            }
        }
        Endpoint::TranslateList => ConversionOutput::Ordered {
            translations: normalizer::parse_ordered_translations(&reply, &TARGET_LANGUAGES)?,
        },
    };
    Ok(output)
}

/// Runs one request through the pipeline. Each stage has a single failure exit.
pub async fn run(state: &AppState, endpoint: Endpoint, request: ConversionRequest) -> Result<ConversionResult, ApiError> {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let prepared = prepare(state, endpoint, request)?;

    info!(
        "[{}] {} | language: {} | chars: {}",
        &request_id[..8],
        endpoint.path(),
        prepared.language.unwrap_or("-"),
        prepared.text.chars().count()
    );

    let blocks = state
        .completion
        .complete(CompletionRequest {
            prompt: prepared.prompt,
            max_tokens: endpoint.max_tokens(),
        })
        .await
        .map_err(|e| {
            warn!("[{}] Upstream call failed: {}", &request_id[..8], e);
            ApiError::from(e)
        })?;

    let reply = normalizer::collect_text(&blocks);

    let output = normalize(endpoint, prepared.language, reply).map_err(|e| {
        warn!("[{}] Model reply could not be normalized: {}", &request_id[..8], e);
        e
    })?;

    Ok(ConversionResult::ok(prepared.text, output))
}
