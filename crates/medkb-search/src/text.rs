//! Vietnamese text normalization and keyword extraction.
//!
//! Pure functions shared by the lexical pass, the TF-IDF analyzer, the symptom
//! matcher and the recommendation explainer. Empty input always yields empty
//! output.

use unicode_normalization::UnicodeNormalization;

/// Lowercase Vietnamese letters carrying diacritics (plus `đ`).
const VIETNAMESE_LETTERS: &str = "àáạảãâầấậẩẫăằắặẳẵ\
èéẹẻẽêềếệểễ\
ìíịỉĩ\
òóọỏõôồốộổỗơờớợởỡ\
ùúụủũưừứựửữ\
ỳýỵỷỹ\
đ";

/// Function words dropped before indexing and keyword extraction.
const STOPWORDS: &[&str] = &[
    "và", "của", "có", "là", "được", "cho", "với", "các", "những", "này", "đó", "trong", "để",
    "khi", "thì", "mà", "như", "từ", "theo", "về", "một", "nhiều", "không", "tôi", "bạn", "gì",
    "nào", "sao", "thế", "rất", "cũng", "đã", "sẽ", "đang", "hay", "hoặc", "nên", "vì", "nếu",
    "ra", "vào", "lại", "còn", "ở", "bị", "làm", "thể",
];

/// Medical terms kept as keywords regardless of length.
const MEDICAL_KEYWORDS: &[&str] = &[
    "đau", "sốt", "ho", "bệnh", "thuốc", "viêm", "nhiễm", "tim", "phổi", "gan", "thận", "máu",
    "huyết", "áp", "tiểu", "đường", "ung", "thư", "dị", "ứng", "virus", "khuẩn", "vaccine",
    "tiêm", "chủng", "triệu", "chứng", "trị", "chẩn", "đoán", "khám", "mệt", "mỏi", "nôn", "tiêu",
    "chảy", "khó", "thở", "đầu", "bụng", "ngực", "họng", "da", "mắt", "xương", "khớp", "cúm",
    "covid", "tăng", "hạ", "mỡ", "béo", "phì", "đột", "quỵ", "hen", "suyễn",
];

fn is_kept_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c.is_whitespace()
        || VIETNAMESE_LETTERS.contains(c)
}

/// Compose to NFC, lowercase, strip everything except `[a-z0-9]`, whitespace
/// and Vietnamese letters, collapse whitespace runs and trim.
///
/// Decomposed input (base letter plus combining marks) keeps its diacritics.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let composed: String = text.nfc().collect();
    let kept: String = composed
        .to_lowercase()
        .chars()
        .filter(|c| is_kept_char(*c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

#[must_use]
pub fn is_medical_keyword(token: &str) -> bool {
    MEDICAL_KEYWORDS.contains(&token)
}

/// Drop stopword tokens and rejoin with single spaces.
#[must_use]
pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|t| !is_stopword(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized tokens of `text`, stopwords included.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Keyword candidates: medical terms, or tokens longer than four characters
/// that are not stopwords.
///
/// Deduplicated; returned in order of first appearance, but callers must treat
/// the result as a set.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in normalize(text).split_whitespace() {
        let keep = is_medical_keyword(token)
            || (token.chars().count() > 4 && !is_stopword(token));
        if keep && !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("   ", "")]
    #[case("Tăng  HUYẾT áp!!", "tăng huyết áp")]
    #[case("Sốt\t\ncao, đau-đầu?", "sốt cao đauđầu")]
    #[case("COVID-19 (2024)", "covid19 2024")]
    #[case("Đường huyết", "đường huyết")]
    #[case("so\u{0302}\u{0301}t", "sốt")]
    #[case("HUYE\u{0302}\u{0301}T A\u{0301}P", "huyết áp")]
    #[case("di\u{0323} u\u{031B}\u{0301}ng", "dị ứng")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn normalize_drops_non_vietnamese_symbols() {
        assert_eq!(normalize("liều 5mg → 10mg ©"), "liều 5mg 10mg");
    }

    #[test]
    fn removes_stopwords() {
        assert_eq!(
            remove_stopwords("tôi bị sốt và ho có nguy hiểm không"),
            "sốt ho nguy hiểm"
        );
        assert_eq!(remove_stopwords(""), "");
    }

    #[test]
    fn extracts_medical_and_long_tokens() {
        // "nguy"/"hiểm" are too short, "không" is a stopword
        let keywords = extract_keywords("Tăng huyết áp nguy hiểm không?");
        assert_eq!(keywords, vec!["tăng", "huyết", "áp"]);
    }

    #[test]
    fn keywords_are_deduplicated() {
        let keywords = extract_keywords("sốt sốt SỐT nhiễm trùng nhiễm trùng");
        assert_eq!(keywords, vec!["sốt", "nhiễm", "trùng"]);
    }

    #[test]
    fn short_non_medical_tokens_are_dropped() {
        assert!(extract_keywords("xin chào bạn nhé").is_empty());
    }

    #[test]
    fn tokens_keep_stopwords() {
        assert_eq!(tokens("Tôi bị ho"), vec!["tôi", "bị", "ho"]);
    }
}
