// 模型输出归一化
// 拼接文本块 -> 去除 Markdown 代码围栏 -> 解析 JSON -> 按静态语言表补齐

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::conversion::{OrderedTranslation, TranslationEntry};
use crate::models::language::{find_target_language, SupportedLanguage};
use crate::proxy::mappers::claude::models::ContentBlock;

static LEADING_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*(\r?\n)?").expect("valid fence regex"));
static TRAILING_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\r?\n)?[ \t]*```$").expect("valid fence regex"));

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected reply shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Joins every text block in order and trims the result; other blocks are dropped.
pub fn collect_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|b| match b {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Removes one leading and one trailing Markdown code fence, if present.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let without_leading = LEADING_FENCE_RE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE_RE.replace(&without_leading, "");
    without_trailing.trim().to_string()
}

fn parse_reply(text: &str) -> Result<Value, NormalizeError> {
    Ok(serde_json::from_str(&strip_code_fences(text))?)
}

fn str_field<'a>(value: Option<&'a Value>, key: &str) -> &'a str {
    value
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

/// Merges a `{code: {translation, pronunciation}}` object with the table.
fn merge_keyed(map: &serde_json::Map<String, Value>, table: &[SupportedLanguage]) -> Vec<TranslationEntry> {
    table
        .iter()
        .map(|lang| {
            let entry = map.get(lang.code);
            TranslationEntry {
                code: lang.code.to_string(),
                name: lang.name.to_string(),
                flag: lang.flag.to_string(),
                translation: str_field(entry, "translation").to_string(),
                pronunciation: str_field(entry, "pronunciation").to_string(),
            }
        })
        .collect()
}

/// Keyed reply of the fixed-source endpoint.
pub fn parse_keyed_translations(
    text: &str,
    table: &[SupportedLanguage],
) -> Result<Vec<TranslationEntry>, NormalizeError> {
    let value = parse_reply(text)?;
    let map = value
        .as_object()
        .ok_or(NormalizeError::UnexpectedShape("expected a JSON object keyed by language code"))?;
    Ok(merge_keyed(map, table))
}

/// Reply of the language-detect endpoint: `{detectedLanguage, translations: {...}}`.
///
/// A reply without a `translations` object is read as the keyed map itself.
/// An unknown or missing detected code becomes an empty string.
pub fn parse_detected_translations(
    text: &str,
    table: &[SupportedLanguage],
) -> Result<(String, Vec<TranslationEntry>), NormalizeError> {
    let value = parse_reply(text)?;
    let root = value
        .as_object()
        .ok_or(NormalizeError::UnexpectedShape("expected a JSON object"))?;

    let detected = root
        .get("detectedLanguage")
        .and_then(|v| v.as_str())
        .and_then(find_target_language)
        .filter(|lang| table.iter().any(|t| t.code == lang.code))
        .map(|lang| lang.code.to_string())
        .unwrap_or_default();

    let translations = root
        .get("translations")
        .and_then(|v| v.as_object())
        .unwrap_or(root);

    Ok((detected, merge_keyed(translations, table)))
}

/// Ordered reply: a bare array or `{translations: [...]}` of `{language, text, hangul}`.
///
/// Entries are matched to the table by code; the first match wins and codes
/// outside the table are dropped.
pub fn parse_ordered_translations(
    text: &str,
    table: &[SupportedLanguage],
) -> Result<Vec<OrderedTranslation>, NormalizeError> {
    let value = parse_reply(text)?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("translations")
            .and_then(|v| v.as_array())
            .ok_or(NormalizeError::UnexpectedShape("expected a `translations` array"))?,
        _ => return Err(NormalizeError::UnexpectedShape("expected a JSON array")),
    };

    Ok(table
        .iter()
        .map(|lang| {
            let item = items.iter().find(|item| {
                item.get("language")
                    .and_then(|v| v.as_str())
                    .map(|code| code.trim().eq_ignore_ascii_case(lang.code))
                    .unwrap_or(false)
            });
            OrderedTranslation {
                language: lang.code.to_string(),
                text: str_field(item, "text").to_string(),
                hangul: str_field(item, "hangul").to_string(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::language::TARGET_LANGUAGES;

    fn text_block(s: &str) -> ContentBlock {
        ContentBlock::Text { text: s.to_string() }
    }

    #[test]
    fn test_collect_text_skips_non_text_blocks() {
        let blocks = vec![text_block("  헬로"), ContentBlock::Other, text_block(" 월드  ")];
        assert_eq!(collect_text(&blocks), "헬로 월드");
        assert_eq!(collect_text(&[]), "");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fences("```json {\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_keyed_fills_missing_languages_in_table_order() {
        let reply = r#"```json
{
  "ko": {"translation": "서울을 사랑해", "pronunciation": "서울을 사랑해"},
  "ja": {"translation": "ソウルが大好き", "pronunciation": "서우루가 다이스키"},
  "de": {"translation": "Ich liebe Seoul", "pronunciation": "이히 리베 서울"}
}
```"#;
        let results = parse_keyed_translations(reply, &TARGET_LANGUAGES).unwrap();

        assert_eq!(results.len(), TARGET_LANGUAGES.len());
        let codes: Vec<_> = results.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "ja", "vi", "th", "es", "fr", "it", "ko"]);

        assert_eq!(results[1].pronunciation, "서우루가 다이스키");
        assert_eq!(results[1].flag, "🇯🇵");
        assert_eq!(results[0].translation, "");
        assert_eq!(results[0].pronunciation, "");
        assert_eq!(results[7].name, "한국어");
    }

    #[test]
    fn test_keyed_non_string_fields_become_empty() {
        let reply = r#"{"en": {"translation": 42}, "ja": "oops"}"#;
        let results = parse_keyed_translations(reply, &TARGET_LANGUAGES).unwrap();
        assert_eq!(results[0].translation, "");
        assert_eq!(results[1].translation, "");
    }

    #[test]
    fn test_keyed_rejects_invalid_json_and_wrong_shape() {
        assert!(matches!(
            parse_keyed_translations("Sorry, I cannot help with that.", &TARGET_LANGUAGES),
            Err(NormalizeError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_keyed_translations("[1, 2]", &TARGET_LANGUAGES),
            Err(NormalizeError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_detected_language() {
        let reply = r#"{"detectedLanguage": "VI", "translations": {"vi": {"translation": "Xin chào", "pronunciation": "씬 짜오"}}}"#;
        let (detected, results) = parse_detected_translations(reply, &TARGET_LANGUAGES).unwrap();
        assert_eq!(detected, "vi");
        assert_eq!(results[2].translation, "Xin chào");
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn test_detected_language_unknown_or_flat_reply() {
        let reply = r#"{"detectedLanguage": "de", "en": {"translation": "Hello", "pronunciation": "헬로"}}"#;
        let (detected, results) = parse_detected_translations(reply, &TARGET_LANGUAGES).unwrap();
        assert_eq!(detected, "");
        assert_eq!(results[0].pronunciation, "헬로");
    }

    #[test]
    fn test_ordered_drops_unknown_and_fills_missing() {
        let reply = r#"{"translations": [
            {"language": "de", "text": "Guten Morgen", "hangul": "구텐 모르겐"},
            {"language": "ja", "text": "おはよう", "hangul": "오하요"},
            {"language": "en", "text": "Good morning", "hangul": "굿 모닝"}
        ]}"#;
        let out = parse_ordered_translations(reply, &TARGET_LANGUAGES).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(out[0].language, "en");
        assert_eq!(out[0].hangul, "굿 모닝");
        assert_eq!(out[1].text, "おはよう");
        assert!(out.iter().all(|t| t.language != "de"));
        assert_eq!(out[7].text, "");
    }

    #[test]
    fn test_ordered_accepts_bare_array() {
        let out = parse_ordered_translations(
            r#"[{"language": "ko", "text": "좋은 아침", "hangul": "조은 아침"}]"#,
            &TARGET_LANGUAGES,
        )
        .unwrap();
        assert_eq!(out[7].hangul, "조은 아침");
    }

    #[test]
    fn test_ordered_rejects_object_without_array() {
        assert!(matches!(
            parse_ordered_translations(r#"{"en": {}}"#, &TARGET_LANGUAGES),
            Err(NormalizeError::UnexpectedShape(_))
        ));
    }
}
