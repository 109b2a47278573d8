// 提示词构建
// 用户文本原样嵌入，不做转义或注入防护

use std::fmt::Write;

use crate::models::language::{SourceLanguage, SupportedLanguage, FIXED_SOURCE_CODE};
use crate::proxy::config::PromptLanguage;

const PROPER_NOUN_EXAMPLES: &str = "Seoul, Tokyo, Paris, BMW, Apple, BTS, iPhone 등";

/// Single-phrase transliteration of `text` written in `language`.
pub fn build_transliteration_prompt(language: &SourceLanguage, text: &str) -> String {
    let name = language.korean_name;
    format!(
        "다음 {name} 문장의 발음을 한글로 정확하게 표기해주세요. \n\
         \n\
         중요한 규칙:\n\
         1. 고유명사(나라명, 지명, 인명, 회사명 등)는 한국에서 통용되는 표기를 우선 사용하세요\n\
         \x20  예: Korea → 코리안, Korean → 코리안\n\
         \x20  예: China → 차이나\n\
         \x20  예: America → 아메리카\n\
         2. 일반 단어는 원어민 발음을 한글로 표기하세요\n\
         3. 구두점(쉼표, 물음표 등)도 그대로 유지하세요\n\
         4. 설명 없이 한글 발음만 답변해주세요\n\
         \n\
         {name}: {text}\n\
         한글 발음:"
    )
}

/// Fixed-source (English) translation into every table language, keyed reply.
pub fn build_translate_all_prompt(text: &str, targets: &[SupportedLanguage]) -> String {
    let count = translated_count(targets);
    let schema = keyed_schema(targets, 0);
    format!(
        "다음 영어 문장을 {count}개 언어로 번역하고, 각 번역의 발음을 한글로 표기해주세요.\n\
         \n\
         중요한 규칙:\n\
         1. 국제적으로 잘 알려진 고유명사(도시명, 국가명, 브랜드명, 인명 등)는 원어 그대로 유지하세요\n\
         \x20  예: {PROPER_NOUN_EXAMPLES}\n\
         2. 각 언어의 자연스러운 표현으로 번역하세요\n\
         3. 한글 발음은 실제 발음에 최대한 가깝게 표기하세요\n\
         4. JSON 형식으로만 답변하고, 다른 설명은 하지 마세요\n\
         \n\
         영어 원문: {text}\n\
         \n\
         다음 형식의 JSON으로만 답변해주세요:\n\
         {schema}"
    )
}

/// Detects the source language among the table codes, then translates.
pub fn build_detect_prompt(text: &str, targets: &[SupportedLanguage]) -> String {
    let codes = targets.iter().map(|l| l.code).collect::<Vec<_>>().join(", ");
    let schema = keyed_schema(targets, 2);
    format!(
        "다음 문장이 어떤 언어인지 먼저 감지한 뒤, {n}개 언어로 번역하고 각 번역의 발음을 한글로 표기해주세요.\n\
         \n\
         감지 가능한 언어 코드: {codes}\n\
         \n\
         중요한 규칙:\n\
         1. 원문의 언어를 위 코드 중 하나로 판단하세요\n\
         2. 국제적으로 잘 알려진 고유명사(도시명, 국가명, 브랜드명, 인명 등)는 번역하지 말고 원어 그대로 유지하되, 한글 발음은 소리 나는 대로 표기하세요\n\
         \x20  예: {PROPER_NOUN_EXAMPLES}\n\
         3. 원문과 같은 언어의 항목에는 원문을 그대로 넣으세요\n\
         4. 한글 발음은 실제 발음에 최대한 가깝게 표기하세요\n\
         5. JSON 형식으로만 답변하고, 다른 설명은 하지 마세요\n\
         \n\
         원문: {text}\n\
         \n\
         다음 형식의 JSON으로만 답변해주세요:\n\
         {{\n\
         \x20 \"detectedLanguage\": \"감지된 언어 코드\",\n\
         \x20 \"translations\": {schema}\n\
         }}",
        n = targets.len()
    )
}

/// Ordered-list variant. `declared` is the count stated in the header; the
/// enumerated list comes from configuration and may be longer.
pub fn build_ordered_list_prompt(text: &str, languages: &[PromptLanguage], declared: usize) -> String {
    let mut list = String::new();
    for (i, lang) in languages.iter().enumerate() {
        let _ = writeln!(list, "{}. {} ({})", i + 1, lang.label, lang.code);
    }
    let example_code = languages
        .first()
        .map(|l| l.code.as_str())
        .unwrap_or(FIXED_SOURCE_CODE);

    format!(
        "다음 영어 문장을 {declared}개 언어로 번역하고, 각 번역의 발음을 한글로 표기해주세요.\n\
         \n\
         번역할 언어 (순서대로):\n\
         {list}\
         \n\
         중요한 규칙:\n\
         1. 국제적으로 잘 알려진 고유명사(도시명, 국가명, 브랜드명, 인명 등)는 번역하지 말고 원어 그대로 유지하되, 한글 발음은 소리 나는 대로 표기하세요\n\
         \x20  예: {PROPER_NOUN_EXAMPLES}\n\
         2. 각 언어의 자연스러운 표현으로 번역하세요\n\
         3. 위 목록의 순서를 지켜 배열로 답변하세요\n\
         4. JSON 형식으로만 답변하고, 다른 설명은 하지 마세요\n\
         \n\
         영어 원문: {text}\n\
         \n\
         다음 형식의 JSON으로만 답변해주세요:\n\
         {{\n\
         \x20 \"translations\": [\n\
         \x20   {{ \"language\": \"{example_code}\", \"text\": \"번역문\", \"hangul\": \"한글 발음\" }}\n\
         \x20 ]\n\
         }}"
    )
}

/// Number of languages actually translated into (the fixed source is copied).
fn translated_count(targets: &[SupportedLanguage]) -> usize {
    targets.iter().filter(|l| l.code != FIXED_SOURCE_CODE).count()
}

/// Renders the keyed reply schema in table order, nested `indent` spaces deep.
fn keyed_schema(targets: &[SupportedLanguage], indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::from("{\n");
    for (i, lang) in targets.iter().enumerate() {
        let translation = if lang.code == FIXED_SOURCE_CODE {
            "원문 그대로".to_string()
        } else {
            format!("{} 번역", lang.korean_name)
        };
        let sep = if i + 1 < targets.len() { "," } else { "" };
        let _ = write!(
            out,
            "{pad}  \"{code}\": {{\n\
             {pad}    \"translation\": \"{translation}\",\n\
             {pad}    \"pronunciation\": \"한글 발음\"\n\
             {pad}  }}{sep}\n",
            code = lang.code
        );
    }
    out.push_str(&pad);
    out.push('}');
    out
}
