//! Hybrid merge of lexical and vector hits, plus popularity/recency bonuses.
//!
//! An entry found by both passes gets `lexical_weight * lexical +
//! semantic_weight * semantic`; an entry found by one pass keeps that pass's
//! score unchanged. Re-ranking then adds a capped view-count bonus and a
//! recency bonus that decays linearly to zero across the recency window.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use medkb_config::SearchConfig;

use crate::vector::VectorHit;

/// Merged scores for one entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HybridScore {
    pub entry_id: String,
    pub lexical_score: Option<f64>,
    pub semantic_score: Option<f64>,
    pub combined_score: f64,
}

fn blend(lexical: Option<f64>, semantic: Option<f64>, config: &SearchConfig) -> f64 {
    match (lexical, semantic) {
        (Some(l), Some(s)) => config.lexical_weight.mul_add(l, config.semantic_weight * s),
        (Some(l), None) => l,
        (None, Some(s)) => s,
        (None, None) => 0.0,
    }
}

/// Merge both passes, deduplicating by entry id.
///
/// Sorted by combined score descending, then entry id ascending.
#[must_use]
pub fn combine_results(
    lexical: &[(String, f64)],
    semantic: &[VectorHit],
    config: &SearchConfig,
) -> Vec<HybridScore> {
    let mut merged: HashMap<&str, HybridScore> = HashMap::new();

    for (id, score) in lexical {
        let entry = merged.entry(id.as_str()).or_insert_with(|| HybridScore {
            entry_id: id.clone(),
            lexical_score: None,
            semantic_score: None,
            combined_score: 0.0,
        });
        entry.lexical_score = Some(*score);
        entry.combined_score = blend(entry.lexical_score, entry.semantic_score, config);
    }

    for hit in semantic {
        let entry = merged
            .entry(hit.entry_id.as_str())
            .or_insert_with(|| HybridScore {
                entry_id: hit.entry_id.clone(),
                lexical_score: None,
                semantic_score: None,
                combined_score: 0.0,
            });
        entry.semantic_score = Some(hit.score);
        entry.combined_score = blend(entry.lexical_score, entry.semantic_score, config);
    }

    let mut results: Vec<HybridScore> = merged.into_values().collect();
    results.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entry_id.cmp(&b.entry_id))
    });
    results
}

/// `min(view_count / divisor, cap)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn view_bonus(view_count: u64, config: &SearchConfig) -> f64 {
    (view_count as f64 / config.view_bonus_divisor).min(config.view_bonus_cap)
}

/// Full bonus for an entry updated at `now`, zero at or beyond the window.
///
/// Timestamps in the future count as fresh.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recency_bonus(updated_at: DateTime<Utc>, now: DateTime<Utc>, config: &SearchConfig) -> f64 {
    let age_days = (now - updated_at).num_seconds().max(0) as f64 / 86_400.0;
    let remaining = (1.0 - age_days / config.recency_window_days).max(0.0);
    config.recency_bonus_max * remaining
}
