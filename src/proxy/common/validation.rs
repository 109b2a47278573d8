// 输入校验
use crate::models::conversion::ConversionRequest;
use crate::models::language::{find_source_language, SourceLanguage};
use crate::proxy::common::error::ApiError;

pub const MISSING_TEXT_AND_LANGUAGE: &str = "텍스트와 언어를 모두 입력해주세요.";
pub const MISSING_TEXT: &str = "텍스트를 입력해주세요.";
pub const UNSUPPORTED_LANGUAGE: &str = "지원하지 않는 언어입니다.";

fn too_long(limit: usize) -> ApiError {
    ApiError::InvalidRequest(format!("텍스트가 너무 깁니다. (최대 {}자)", limit))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_length(text: &str, max_chars: usize) -> Result<(), ApiError> {
    if max_chars > 0 && text.chars().count() > max_chars {
        return Err(too_long(max_chars));
    }
    Ok(())
}

/// Validates the single-language endpoint body.
pub fn require_text_and_language(
    request: ConversionRequest,
    max_chars: usize,
) -> Result<(String, &'static SourceLanguage), ApiError> {
    let (text, language) = match (non_empty(request.text), non_empty(request.language)) {
        (Some(text), Some(language)) => (text, language),
        _ => return Err(ApiError::InvalidRequest(MISSING_TEXT_AND_LANGUAGE.to_string())),
    };

    let language = find_source_language(&language)
        .ok_or_else(|| ApiError::InvalidRequest(UNSUPPORTED_LANGUAGE.to_string()))?;

    check_length(&text, max_chars)?;
    Ok((text, language))
}

/// Validates the multi-language endpoint body. `language`, if sent, is ignored.
pub fn require_text(request: ConversionRequest, max_chars: usize) -> Result<String, ApiError> {
    let text = non_empty(request.text).ok_or_else(|| ApiError::InvalidRequest(MISSING_TEXT.to_string()))?;
    check_length(&text, max_chars)?;
    Ok(text)
}
