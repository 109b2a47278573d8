// 语言表
// 部署时固定、运行期只读，可在并发请求间直接共享

/// A row of the target-language table reported by the multi-language endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// Short code used as the JSON key in model replies (e.g. `ja`).
    pub code: &'static str,
    /// Native display name returned to callers.
    pub name: &'static str,
    pub flag: &'static str,
    /// Korean label used inside prompts.
    pub korean_name: &'static str,
}

/// A source language accepted by `/api/convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLanguage {
    /// Request key (e.g. `english`).
    pub key: &'static str,
    /// Korean label used inside prompts.
    pub korean_name: &'static str,
}

/// Code of the language the fixed-source endpoints translate from.
pub const FIXED_SOURCE_CODE: &str = "en";

pub static SOURCE_LANGUAGES: [SourceLanguage; 8] = [
    SourceLanguage { key: "english", korean_name: "영어" },
    SourceLanguage { key: "spanish", korean_name: "스페인어" },
    SourceLanguage { key: "french", korean_name: "프랑스어" },
    SourceLanguage { key: "german", korean_name: "독일어" },
    SourceLanguage { key: "italian", korean_name: "이탈리아어" },
    SourceLanguage { key: "japanese", korean_name: "일본어" },
    SourceLanguage { key: "vietnamese", korean_name: "베트남어" },
    SourceLanguage { key: "thai", korean_name: "태국어" },
];

/// Result order of every multi-language endpoint.
pub static TARGET_LANGUAGES: [SupportedLanguage; 8] = [
    SupportedLanguage { code: "en", name: "English", flag: "🇺🇸", korean_name: "영어" },
    SupportedLanguage { code: "ja", name: "日本語", flag: "🇯🇵", korean_name: "일본어" },
    SupportedLanguage { code: "vi", name: "Tiếng Việt", flag: "🇻🇳", korean_name: "베트남어" },
    SupportedLanguage { code: "th", name: "ภาษาไทย", flag: "🇹🇭", korean_name: "태국어" },
    SupportedLanguage { code: "es", name: "Español", flag: "🇪🇸", korean_name: "스페인어" },
    SupportedLanguage { code: "fr", name: "Français", flag: "🇫🇷", korean_name: "프랑스어" },
    SupportedLanguage { code: "it", name: "Italiano", flag: "🇮🇹", korean_name: "이탈리아어" },
    SupportedLanguage { code: "ko", name: "한국어", flag: "🇰🇷", korean_name: "한국어" },
];

pub fn find_source_language(key: &str) -> Option<&'static SourceLanguage> {
    SOURCE_LANGUAGES.iter().find(|l| l.key == key)
}

/// Looks a table row up by code, ignoring case and surrounding whitespace.
pub fn find_target_language(code: &str) -> Option<&'static SupportedLanguage> {
    let code = code.trim();
    TARGET_LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lookup_is_exact() {
        assert_eq!(find_source_language("thai").map(|l| l.korean_name), Some("태국어"));
        assert!(find_source_language("Thai").is_none());
        assert!(find_source_language("korean").is_none());
    }

    #[test]
    fn test_target_lookup_tolerates_case() {
        assert_eq!(find_target_language(" JA ").map(|l| l.code), Some("ja"));
        assert!(find_target_language("de").is_none());
    }

    #[test]
    fn test_tables_have_unique_keys() {
        let mut codes: Vec<_> = TARGET_LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TARGET_LANGUAGES.len());

        let mut keys: Vec<_> = SOURCE_LANGUAGES.iter().map(|l| l.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), SOURCE_LANGUAGES.len());
    }
}
