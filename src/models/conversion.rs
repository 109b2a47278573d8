// 转换请求 / 响应模型

use serde::{Deserialize, Serialize};

/// Inbound body shared by all conversion endpoints.
///
/// Both fields are optional on the wire so that a missing field turns into a
/// 400 with a readable message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One row of `results`, merged from the model reply and the language table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub translation: String,
    pub pronunciation: String,
}

/// One row of `translations` for the ordered list variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedTranslation {
    pub language: String,
    pub text: String,
    pub hangul: String,
}

/// Endpoint-specific part of a successful response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConversionOutput {
    Hangul {
        hangul: String,
        language: String,
    },
    Results {
        #[serde(rename = "detectedLanguage", skip_serializing_if = "Option::is_none")]
        detected_language: Option<String>,
        results: Vec<TranslationEntry>,
    },
    Ordered {
        translations: Vec<OrderedTranslation>,
    },
}

/// Successful response payload. Failures are rendered by `ApiError`.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    pub original: String,
    #[serde(flatten)]
    pub output: ConversionOutput,
}

impl ConversionResult {
    pub fn ok(original: String, output: ConversionOutput) -> Self {
        Self {
            success: true,
            original,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hangul_result_shape() {
        let result = ConversionResult::ok(
            "Hello".to_string(),
            ConversionOutput::Hangul {
                hangul: "헬로".to_string(),
                language: "english".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "original": "Hello", "hangul": "헬로", "language": "english"})
        );
    }

    #[test]
    fn test_detected_language_omitted_when_absent() {
        let result = ConversionResult::ok(
            "Hi".to_string(),
            ConversionOutput::Results {
                detected_language: None,
                results: vec![],
            },
        );
        let v = serde_json::to_value(&result).unwrap();
        assert!(v.get("detectedLanguage").is_none());
        assert_eq!(v["results"], json!([]));
    }

    #[test]
    fn test_request_tolerates_missing_fields() {
        let req: ConversionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());
        assert!(req.language.is_none());
    }
}
