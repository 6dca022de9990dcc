//! Search orchestration: lexical pass + vector pass, merge, re-rank, audit.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use medkb_config::{MedkbConfig, SearchConfig};
use medkb_core::entities::{KnowledgeEntry, SearchLogRecord};
use medkb_core::errors::CoreError;
use serde::{Deserialize, Serialize};

use crate::audit::AuditSink;
use crate::corpus::ContentStore;
use crate::error::SearchError;
use crate::filters::SearchFilters;
use crate::hybrid::{combine_results, recency_bonus, view_bonus};
use crate::lexical::lexical_pass;
use crate::text;
use crate::vector::{VectorHit, VectorIndex};

/// One ranked search result with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub entry: KnowledgeEntry,
    pub lexical_score: Option<f64>,
    pub semantic_score: Option<f64>,
    /// Score after the hybrid merge, before bonuses.
    pub combined_score: f64,
    pub view_bonus: f64,
    pub recency_bonus: f64,
    /// Final ranking score.
    pub score: f64,
}

/// An entry similar to another one, by TF-IDF cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntry {
    pub entry: KnowledgeEntry,
    pub similarity: f64,
}

/// Hybrid knowledge-base search over a [`ContentStore`].
pub struct SearchEngine {
    store: Arc<dyn ContentStore>,
    index: Arc<VectorIndex>,
    audit: Arc<dyn AuditSink>,
    config: SearchConfig,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("index", &self.index)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        index: Arc<VectorIndex>,
        audit: Arc<dyn AuditSink>,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            index,
            audit,
            config,
        }
    }

    /// Engine with a fresh [`VectorIndex`] over `store`.
    #[must_use]
    pub fn from_config(
        store: Arc<dyn ContentStore>,
        audit: Arc<dyn AuditSink>,
        config: &MedkbConfig,
    ) -> Self {
        let index = Arc::new(VectorIndex::new(Arc::clone(&store), config.index.clone()));
        Self::new(store, index, audit, config.search.clone())
    }

    #[must_use]
    pub const fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ranked entries for `query`, at most `limit` of them.
    ///
    /// Never fails: store errors are logged and yield an empty list, vector
    /// failures degrade to lexical-only results. An empty query returns
    /// nothing without touching the index. Every call is audited.
    pub fn search(&self, query: &str, filters: &SearchFilters, limit: usize) -> Vec<ScoredEntry> {
        let started = Instant::now();

        let results = if query.trim().is_empty() {
            Vec::new()
        } else {
            self.try_search(query, filters, limit, Utc::now())
                .unwrap_or_else(|e| {
                    tracing::warn!(query, error = %e, "search failed, returning no results");
                    Vec::new()
                })
        };

        self.audit(query, results.len(), started);
        results
    }

    fn try_search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredEntry>, SearchError> {
        let entries = self.store.knowledge_entries()?;
        let by_id: HashMap<&str, &KnowledgeEntry> =
            entries.iter().map(|e| (e.id.as_str(), e)).collect();

        let lexical: Vec<(String, f64)> = lexical_pass(&entries, query, filters, &self.config)
            .into_iter()
            .map(|(e, score)| (e.id.clone(), score))
            .collect();

        let candidates = limit.saturating_mul(self.config.vector_candidate_multiplier);
        let semantic: Vec<VectorHit> = match self.index.query(query, candidates) {
            Ok(hits) => hits
                .into_iter()
                .filter(|hit| by_id.get(hit.entry_id.as_str()).is_some_and(|e| filters.accepts(e)))
                .collect(),
            Err(e) => {
                tracing::warn!(query, error = %e, "vector pass failed, using lexical results only");
                Vec::new()
            }
        };

        tracing::debug!(
            query,
            lexical = lexical.len(),
            semantic = semantic.len(),
            "search passes complete"
        );

        let mut results: Vec<ScoredEntry> = combine_results(&lexical, &semantic, &self.config)
            .into_iter()
            .filter_map(|hit| {
                let entry = by_id.get(hit.entry_id.as_str())?;
                let view = view_bonus(entry.view_count, &self.config);
                let recency = recency_bonus(entry.updated_at, now, &self.config);
                Some(ScoredEntry {
                    entry: (*entry).clone(),
                    lexical_score: hit.lexical_score,
                    semantic_score: hit.semantic_score,
                    combined_score: hit.combined_score,
                    view_bonus: view,
                    recency_bonus: recency,
                    score: hit.combined_score + view + recency,
                })
            })
            .filter(|scored| scored.score >= self.config.min_score)
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        results.truncate(limit);
        Ok(results)
    }

    fn audit(&self, query: &str, results_count: usize, started: Instant) {
        let record = SearchLogRecord {
            query: query.to_string(),
            results_count,
            response_time_ms: Some(started.elapsed().as_secs_f64() * 1000.0),
            created_at: Utc::now(),
        };
        if let Err(e) = self.audit.record(record) {
            tracing::warn!(query, error = %e, "failed to record search audit");
        }
    }

    /// Fetch an active entry for display and count the view.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] (wrapped) for unknown or inactive ids,
    /// and store errors.
    pub fn open_entry(&self, id: &str) -> Result<KnowledgeEntry, SearchError> {
        let mut entry = self.active_entry(id)?;
        entry.view_count = self.store.record_view(id)?;
        Ok(entry)
    }

    /// Other active entries closest to `id` in the current index snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] (wrapped) for unknown or inactive ids,
    /// and store or index errors.
    pub fn related_entries(&self, id: &str, limit: usize) -> Result<Vec<RelatedEntry>, SearchError> {
        self.active_entry(id)?;
        let entries = self.store.knowledge_entries()?;
        let by_id: HashMap<&str, &KnowledgeEntry> =
            entries.iter().map(|e| (e.id.as_str(), e)).collect();

        let candidates = limit.saturating_mul(self.config.vector_candidate_multiplier);
        let related = self
            .index
            .similar_to(id, candidates)?
            .into_iter()
            .filter_map(|hit| {
                let entry = by_id.get(hit.entry_id.as_str()).filter(|e| e.is_active)?;
                Some(RelatedEntry {
                    entry: (*entry).clone(),
                    similarity: hit.score,
                })
            })
            .take(limit)
            .collect();
        Ok(related)
    }

    /// Active entries passing `filters`, most viewed first.
    ///
    /// Ties are broken by reliability (higher first), then id.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn popular_entries(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> Result<Vec<KnowledgeEntry>, SearchError> {
        let mut entries: Vec<KnowledgeEntry> = self
            .store
            .knowledge_entries()?
            .into_iter()
            .filter(|e| filters.accepts(e))
            .collect();
        entries.sort_by(|a, b| {
            b.view_count
                .cmp(&a.view_count)
                .then_with(|| {
                    b.reliability_score
                        .partial_cmp(&a.reliability_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    /// Titles for type-ahead: prefix matches first, then substring matches,
    /// each group ordered by view count.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let wanted = text::normalize(prefix);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(u8, Reverse<u64>, String)> = self
            .store
            .knowledge_entries()?
            .into_iter()
            .filter(|e| e.is_active)
            .filter_map(|e| {
                let title = text::normalize(&e.title);
                let group = if title.starts_with(&wanted) {
                    0
                } else if title.contains(&wanted) {
                    1
                } else {
                    return None;
                };
                Some((group, Reverse(e.view_count), e.title))
            })
            .collect();
        ranked.sort();

        let mut titles: Vec<String> = Vec::new();
        for (_, _, title) in ranked {
            if !titles.contains(&title) {
                titles.push(title);
            }
        }
        titles.truncate(limit);
        Ok(titles)
    }

    fn active_entry(&self, id: &str) -> Result<KnowledgeEntry, SearchError> {
        self.store
            .knowledge_entry(id)?
            .filter(|e| e.is_active)
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity_type: "knowledge entry".to_string(),
                    id: id.to_string(),
                }
                .into()
            })
    }
}
