//! Explainable recommendations on top of [`SearchEngine`].

use std::sync::Arc;

use medkb_core::entities::KnowledgeEntry;
use medkb_core::responses::Recommendation;
use serde::{Deserialize, Serialize};

use crate::engine::SearchEngine;
use crate::filters::SearchFilters;
use crate::text;

const FALLBACK_REASON: &str = "Có liên quan đến câu hỏi của bạn";

/// Caller state that narrows recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendContext {
    /// Entries already shown to the user.
    #[serde(default)]
    pub exclude_ids: Vec<String>,
}

#[derive(Debug)]
pub struct RecommendationRanker {
    engine: Arc<SearchEngine>,
}

impl RecommendationRanker {
    #[must_use]
    pub const fn new(engine: Arc<SearchEngine>) -> Self {
        Self { engine }
    }

    /// Up to `max_results` entries for a free-text question, each with a
    /// reason.
    ///
    /// The query is reduced to its keywords (or to its normalized form when it
    /// has none) and searched without filters.
    pub fn recommend(
        &self,
        query: &str,
        context: Option<&RecommendContext>,
        max_results: usize,
    ) -> Vec<Recommendation> {
        let keywords = text::extract_keywords(query);
        let search_query = if keywords.is_empty() {
            text::normalize(query)
        } else {
            keywords.join(" ")
        };

        let excluded: &[String] = context
            .map(|c| c.exclude_ids.as_slice())
            .unwrap_or_default();
        let query_tokens = meaningful_tokens(query);
        let normalized_query = text::normalize(query);

        self.engine
            .search(
                &search_query,
                &SearchFilters::default(),
                max_results.saturating_mul(2),
            )
            .into_iter()
            .filter(|scored| !excluded.contains(&scored.entry.id))
            .take(max_results)
            .map(|scored| Recommendation {
                why_recommended: explain(&scored.entry, &query_tokens, &normalized_query),
                entry_id: scored.entry.id.clone(),
                title: scored.entry.title.clone(),
                summary: scored.entry.summary.clone(),
                category: scored.entry.category_name().map(str::to_string),
                content_type: scored.entry.content_type,
                difficulty_level: scored.entry.difficulty_level,
                score: scored.score,
            })
            .collect()
    }
}

/// Normalized non-stopword tokens, deduplicated in order.
fn meaningful_tokens(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in text::tokens(raw) {
        if !text::is_stopword(&token) && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

fn shared_tokens(query_tokens: &[String], field: &str) -> Vec<String> {
    let field_tokens = text::tokens(field);
    query_tokens
        .iter()
        .filter(|t| field_tokens.contains(t))
        .cloned()
        .collect()
}

fn explain(entry: &KnowledgeEntry, query_tokens: &[String], normalized_query: &str) -> String {
    let mut reasons: Vec<String> = Vec::new();

    let title_hits = shared_tokens(query_tokens, &entry.title);
    if !title_hits.is_empty() {
        reasons.push(format!("Tiêu đề khớp với: {}", title_hits.join(", ")));
    }

    if let Some(category) = entry.category_name() {
        let normalized = text::normalize(category);
        if !normalized.is_empty() && normalized_query.contains(&normalized) {
            reasons.push(format!("Thuộc chuyên mục: {category}"));
        }
    }

    let keyword_hits = shared_tokens(query_tokens, &entry.keyword_text());
    if !keyword_hits.is_empty() {
        reasons.push(format!("Từ khóa liên quan: {}", keyword_hits.join(", ")));
    }

    if reasons.is_empty() {
        FALLBACK_REASON.to_string()
    } else {
        reasons.join("; ")
    }
}
