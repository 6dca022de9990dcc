//! Search audit: one append-only record per search call.
//!
//! [`SearchEngine`](crate::SearchEngine) hands every record to an
//! [`AuditSink`]. Sink failures are logged and never change the search result.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use medkb_core::entities::SearchLogRecord;

use crate::error::SearchError;

/// Destination for search audit records.
pub trait AuditSink: Send + Sync {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the record cannot be stored.
    fn record(&self, record: SearchLogRecord) -> Result<(), SearchError>;
}

/// Queryable in-memory audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    records: RwLock<Vec<SearchLogRecord>>,
}

impl InMemoryAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn records(&self) -> Result<Vec<SearchLogRecord>, SearchError> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| SearchError::LockPoisoned("audit log"))
    }

    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, SearchError> {
        self.records
            .read()
            .map(|records| records.len())
            .map_err(|_| SearchError::LockPoisoned("audit log"))
    }

    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, SearchError> {
        self.len().map(|n| n == 0)
    }

    /// Records created in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SearchLogRecord>, SearchError> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|r| r.created_at >= from && r.created_at < to)
            .collect())
    }

    /// Records whose query contains `text`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn matching(&self, text: &str) -> Result<Vec<SearchLogRecord>, SearchError> {
        let needle = text.to_lowercase();
        Ok(self
            .records()?
            .into_iter()
            .filter(|r| r.query.to_lowercase().contains(&needle))
            .collect())
    }

    /// Most frequent queries after trimming and lowercasing, with counts.
    ///
    /// Ties are ordered alphabetically.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::LockPoisoned`] if a writer panicked.
    pub fn popular_queries(&self, limit: usize) -> Result<Vec<(String, usize)>, SearchError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in self.records()? {
            let key = record.query.trim().to_lowercase();
            if !key.is_empty() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, record: SearchLogRecord) -> Result<(), SearchError> {
        self.records
            .write()
            .map_err(|_| SearchError::LockPoisoned("audit log"))?
            .push(record);
        Ok(())
    }
}

/// Emits each record as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: SearchLogRecord) -> Result<(), SearchError> {
        tracing::info!(
            query = %record.query,
            results_count = record.results_count,
            response_time_ms = record.response_time_ms,
            created_at = %record.created_at,
            "search audit"
        );
        Ok(())
    }
}
