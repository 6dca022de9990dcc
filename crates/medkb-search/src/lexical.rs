//! Lexical pass: case-insensitive substring match over entry fields.
//!
//! Each field containing the query contributes its weight; the sum is scaled
//! by the entry's reliability and by the verified multiplier.

use medkb_config::SearchConfig;
use medkb_core::entities::KnowledgeEntry;

use crate::filters::SearchFilters;

/// Weighted field-hit score of `entry` for an already lowercased query.
///
/// Returns `None` when no field contains the query.
#[must_use]
pub fn lexical_score(entry: &KnowledgeEntry, query_lower: &str, config: &SearchConfig) -> Option<f64> {
    if query_lower.is_empty() {
        return None;
    }
    let contains = |field: &str| field.to_lowercase().contains(query_lower);

    let mut score = 0.0;
    if contains(&entry.title) {
        score += config.title_weight;
    }
    if contains(&entry.keyword_text()) {
        score += config.keyword_weight;
    }
    if entry.summary.as_deref().is_some_and(contains) {
        score += config.summary_weight;
    }
    if contains(&entry.content) {
        score += config.body_weight;
    }

    if score <= 0.0 {
        return None;
    }
    score *= entry.reliability_score;
    if entry.is_verified {
        score *= config.verified_multiplier;
    }
    Some(score)
}

/// Score every entry that passes `filters` and contains `query`.
///
/// Returned in input order; the caller ranks.
#[must_use]
pub fn lexical_pass<'a>(
    entries: &'a [KnowledgeEntry],
    query: &str,
    filters: &SearchFilters,
    config: &SearchConfig,
) -> Vec<(&'a KnowledgeEntry, f64)> {
    let query_lower = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| filters.accepts(e))
        .filter_map(|e| lexical_score(e, &query_lower, config).map(|score| (e, score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use medkb_core::enums::{ContentType, DifficultyLevel};
    use rstest::rstest;

    fn entry(reliability: f64, verified: bool) -> KnowledgeEntry {
        KnowledgeEntry {
            id: "kb-1".to_string(),
            title: "Tăng huyết áp là gì".to_string(),
            content: "Bệnh lý tim mạch phổ biến".to_string(),
            summary: Some("Tổng quan về tăng huyết áp".to_string()),
            category: None,
            content_type: ContentType::Article,
            difficulty_level: DifficultyLevel::Basic,
            keywords: vec!["huyết áp".to_string()],
            tags: Vec::new(),
            author: None,
            source: None,
            reliability_score: reliability,
            is_verified: verified,
            view_count: 0,
            is_active: true,
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    // title + summary
    #[case("tăng huyết áp", 3.0 + 1.5)]
    // title + keywords + summary
    #[case("huyết áp", 3.0 + 2.0 + 1.5)]
    #[case("tim mạch", 1.0)]
    fn field_weights_add_up(#[case] query: &str, #[case] expected: f64) {
        let score = lexical_score(&entry(1.0, false), query, &SearchConfig::default()).unwrap();
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn reliability_and_verification_scale_the_score() {
        let config = SearchConfig::default();
        let score = lexical_score(&entry(0.9, true), "tim mạch", &config).unwrap();
        assert!((score - 1.0 * 0.9 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn no_field_hit_is_none() {
        assert!(lexical_score(&entry(1.0, false), "cúm", &SearchConfig::default()).is_none());
        assert!(lexical_score(&entry(1.0, false), "", &SearchConfig::default()).is_none());
    }

    #[test]
    fn pass_is_case_insensitive_and_filtered() {
        let entries = vec![entry(1.0, false)];
        let config = SearchConfig::default();
        let hits = lexical_pass(&entries, "  TĂNG Huyết Áp ", &SearchFilters::default(), &config);
        assert_eq!(hits.len(), 1);

        let filters = SearchFilters {
            content_type: Some("FAQ".to_string()),
            ..SearchFilters::default()
        };
        assert!(lexical_pass(&entries, "tăng huyết áp", &filters, &config).is_empty());
    }
}
