//! TF-IDF vector index with atomically swapped snapshots.
//!
//! A build fits a [`TfidfVectorizer`] over every active entry and stores the
//! vectorizer, the document vectors and a parallel array of entry ids as one
//! immutable [`IndexSnapshot`]. Readers clone the current `Arc` and never see a
//! partially built snapshot.
//!
//! Queries rebuild lazily when the snapshot is missing, older than the TTL, or
//! explicitly invalidated. Rebuilds are serialized by a mutex:
//!
//! - no snapshot yet: callers block on the mutex and the first one builds;
//! - stale snapshot: one caller rebuilds, concurrent callers keep reading the
//!   previous snapshot instead of waiting.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, TryLockError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use medkb_config::IndexConfig;
use medkb_core::entities::KnowledgeEntry;

use crate::corpus::ContentStore;
use crate::error::SearchError;
use crate::tfidf::{SparseVector, TfidfVectorizer, cosine};

/// One vector-pass hit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VectorHit {
    pub entry_id: String,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}

/// Immutable point-in-time index state.
#[derive(Debug)]
pub struct IndexSnapshot {
    generation: u64,
    built_at: Instant,
    built_at_utc: DateTime<Utc>,
    /// `None` for an empty corpus (or one with no indexable terms).
    vectorizer: Option<TfidfVectorizer>,
    vectors: Vec<SparseVector>,
    entry_ids: Vec<String>,
}

impl IndexSnapshot {
    fn build(generation: u64, entries: &[KnowledgeEntry], config: &IndexConfig) -> Self {
        let active: Vec<&KnowledgeEntry> = entries.iter().filter(|e| e.is_active).collect();
        let documents: Vec<String> = active.iter().map(|e| e.indexable_text()).collect();

        let vectorizer = TfidfVectorizer::fit(&documents, config);
        let (vectors, entry_ids) = vectorizer.as_ref().map_or_else(
            || (Vec::new(), Vec::new()),
            |v| {
                (
                    documents.iter().map(|d| v.transform(d)).collect(),
                    active.iter().map(|e| e.id.clone()).collect(),
                )
            },
        );

        Self {
            generation,
            built_at: Instant::now(),
            built_at_utc: Utc::now(),
            vectorizer,
            vectors,
            entry_ids,
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at_utc
    }

    #[must_use]
    pub fn document_count(&self) -> usize {
        self.entry_ids.len()
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer
            .as_ref()
            .map_or(0, TfidfVectorizer::vocabulary_len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_ids.is_empty()
    }

    fn is_older_than(&self, ttl: Duration) -> bool {
        self.built_at.elapsed() >= ttl
    }

    /// Rank documents by cosine similarity to `text`.
    ///
    /// Only hits with a positive score at or above `min_similarity` are kept.
    /// Ties keep document order, so repeated queries against one snapshot
    /// return the same ranking.
    #[must_use]
    pub fn query(&self, text: &str, limit: usize, min_similarity: f64) -> Vec<VectorHit> {
        let Some(vectorizer) = &self.vectorizer else {
            return Vec::new();
        };
        let query = vectorizer.transform(text);
        if query.is_empty() {
            return Vec::new();
        }
        self.rank(&query, None, limit, min_similarity)
    }

    /// Rank other documents by similarity to the stored vector of `entry_id`.
    ///
    /// An id missing from the snapshot yields no hits.
    #[must_use]
    pub fn similar_to(&self, entry_id: &str, limit: usize, min_similarity: f64) -> Vec<VectorHit> {
        let Some(position) = self.entry_ids.iter().position(|id| id == entry_id) else {
            return Vec::new();
        };
        self.rank(&self.vectors[position], Some(position), limit, min_similarity)
    }

    fn rank(
        &self,
        target: &[(usize, f64)],
        skip: Option<usize>,
        limit: usize,
        min_similarity: f64,
    ) -> Vec<VectorHit> {
        let mut hits: Vec<VectorHit> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(i, v)| (i, cosine(target, v)))
            .filter(|(_, score)| *score > 0.0 && *score >= min_similarity)
            .map(|(i, score)| VectorHit {
                entry_id: self.entry_ids[i].clone(),
                score,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        hits
    }
}

/// Owned, versioned TF-IDF index over a [`ContentStore`].
pub struct VectorIndex {
    store: Arc<dyn ContentStore>,
    config: IndexConfig,
    current: RwLock<Option<Arc<IndexSnapshot>>>,
    rebuild: Mutex<()>,
    generation: AtomicU64,
    invalidated: AtomicBool,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("config", &self.config)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: IndexConfig) -> Self {
        Self {
            store,
            config,
            current: RwLock::new(None),
            rebuild: Mutex::new(()),
            generation: AtomicU64::new(0),
            invalidated: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Generation of the most recent build; 0 before the first build.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Force the next query to rebuild.
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
    }

    /// The snapshot currently served, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<Option<Arc<IndexSnapshot>>, SearchError> {
        self.current
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SearchError::LockPoisoned("vector index snapshot"))
    }

    /// Build a snapshot from `entries` and swap it in.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a previous rebuild panicked.
    pub fn build(&self, entries: &[KnowledgeEntry]) -> Result<Arc<IndexSnapshot>, SearchError> {
        let _guard = self
            .rebuild
            .lock()
            .map_err(|_| SearchError::LockPoisoned("vector index rebuild"))?;
        self.build_locked(entries)
    }

    /// Rebuild from the content store regardless of staleness.
    ///
    /// # Errors
    ///
    /// Returns store errors and [`SearchError::LockPoisoned`].
    pub fn refresh(&self) -> Result<Arc<IndexSnapshot>, SearchError> {
        let _guard = self
            .rebuild
            .lock()
            .map_err(|_| SearchError::LockPoisoned("vector index rebuild"))?;
        self.rebuild_from_store()
    }

    /// Query the index, rebuilding first if the snapshot is missing or stale.
    ///
    /// # Errors
    ///
    /// Returns store errors raised by a rebuild and
    /// [`SearchError::LockPoisoned`].
    pub fn query(&self, text: &str, limit: usize) -> Result<Vec<VectorHit>, SearchError> {
        let snapshot = self.fresh_snapshot()?;
        Ok(snapshot.query(text, limit, self.config.min_similarity))
    }

    /// Entries whose stored vectors are closest to `entry_id`'s.
    ///
    /// # Errors
    ///
    /// Same as [`Self::query`].
    pub fn similar_to(&self, entry_id: &str, limit: usize) -> Result<Vec<VectorHit>, SearchError> {
        let snapshot = self.fresh_snapshot()?;
        Ok(snapshot.similar_to(entry_id, limit, self.config.min_similarity))
    }

    fn is_fresh(&self, snapshot: &IndexSnapshot) -> bool {
        !self.invalidated.load(Ordering::Acquire)
            && !snapshot.is_older_than(Duration::from_secs(self.config.ttl_secs))
    }

    fn fresh_snapshot(&self) -> Result<Arc<IndexSnapshot>, SearchError> {
        if let Some(snapshot) = self.snapshot()? {
            if self.is_fresh(&snapshot) {
                return Ok(snapshot);
            }
            return match self.rebuild.try_lock() {
                Ok(_guard) => {
                    // Another caller may have finished a rebuild in between.
                    if let Some(latest) = self.snapshot()? {
                        if latest.generation() != snapshot.generation() && self.is_fresh(&latest) {
                            return Ok(latest);
                        }
                    }
                    self.rebuild_from_store()
                }
                Err(TryLockError::WouldBlock) => {
                    tracing::debug!(
                        generation = snapshot.generation(),
                        "rebuild in progress, serving previous snapshot"
                    );
                    Ok(snapshot)
                }
                Err(TryLockError::Poisoned(_)) => {
                    Err(SearchError::LockPoisoned("vector index rebuild"))
                }
            };
        }

        let _guard = self
            .rebuild
            .lock()
            .map_err(|_| SearchError::LockPoisoned("vector index rebuild"))?;
        if let Some(snapshot) = self.snapshot()? {
            return Ok(snapshot);
        }
        self.rebuild_from_store()
    }

    /// Caller must hold the rebuild lock.
    fn rebuild_from_store(&self) -> Result<Arc<IndexSnapshot>, SearchError> {
        let entries = self.store.knowledge_entries()?;
        self.build_locked(&entries)
    }

    /// Caller must hold the rebuild lock.
    fn build_locked(&self, entries: &[KnowledgeEntry]) -> Result<Arc<IndexSnapshot>, SearchError> {
        self.invalidated.store(false, Ordering::Release);
        let started = Instant::now();
        let generation = self.generation.load(Ordering::Acquire) + 1;
        let snapshot = Arc::new(IndexSnapshot::build(generation, entries, &self.config));

        {
            let mut current = self
                .current
                .write()
                .map_err(|_| SearchError::LockPoisoned("vector index snapshot"))?;
            *current = Some(Arc::clone(&snapshot));
        }
        self.generation.store(generation, Ordering::Release);

        tracing::debug!(
            generation,
            documents = snapshot.document_count(),
            vocabulary = snapshot.vocabulary_len(),
            elapsed_ms = started.elapsed().as_millis(),
            "vector index rebuilt"
        );
        Ok(snapshot)
    }
}
