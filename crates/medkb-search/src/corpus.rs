//! Content store abstraction and the in-memory corpus.
//!
//! The knowledge engine reads content from a [`ContentStore`]. Records are
//! owned by the external authoring workflow; the engine only reads them and
//! bumps knowledge-entry view counters. [`InMemoryCorpus`] backs the store with
//! a JSON [`CorpusSnapshot`].

use std::path::Path;
use std::sync::RwLock;

use medkb_core::entities::{DiseaseInformation, KnowledgeEntry, SymptomInformation};
use medkb_core::errors::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Read access to knowledge content plus view counting.
///
/// Listing methods return inactive records too; callers filter on
/// `is_active`.
pub trait ContentStore: Send + Sync {
    /// All knowledge entries.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] when the store cannot be read.
    fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>, SearchError>;

    /// One knowledge entry by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] when the store cannot be read.
    fn knowledge_entry(&self, id: &str) -> Result<Option<KnowledgeEntry>, SearchError>;

    /// # Errors
    ///
    /// Returns [`SearchError::Store`] when the store cannot be read.
    fn symptoms(&self) -> Result<Vec<SymptomInformation>, SearchError>;

    /// # Errors
    ///
    /// Returns [`SearchError::Store`] when the store cannot be read.
    fn diseases(&self) -> Result<Vec<DiseaseInformation>, SearchError>;

    /// Increment an entry's view counter and return the new value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] (wrapped) for an unknown id.
    fn record_view(&self, id: &str) -> Result<u64, SearchError>;
}

/// Serialized corpus: the JSON file format the CLI and tests load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    #[serde(default)]
    pub knowledge_entries: Vec<KnowledgeEntry>,
    #[serde(default)]
    pub symptoms: Vec<SymptomInformation>,
    #[serde(default)]
    pub diseases: Vec<DiseaseInformation>,
}

/// Thread-safe in-memory [`ContentStore`].
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    entries: RwLock<Vec<KnowledgeEntry>>,
    symptoms: RwLock<Vec<SymptomInformation>>,
    diseases: RwLock<Vec<DiseaseInformation>>,
}

impl InMemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from a snapshot, validating every record.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Core`] for the first invalid record.
    pub fn from_snapshot(snapshot: CorpusSnapshot) -> Result<Self, SearchError> {
        let corpus = Self::new();
        for entry in snapshot.knowledge_entries {
            corpus.upsert_entry(entry)?;
        }
        for symptom in snapshot.symptoms {
            corpus.upsert_symptom(symptom)?;
        }
        for disease in snapshot.diseases {
            corpus.upsert_disease(disease)?;
        }
        Ok(corpus)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Snapshot`] for malformed JSON and
    /// [`SearchError::Core`] for invalid records.
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let snapshot: CorpusSnapshot =
            serde_json::from_str(json).map_err(|e| SearchError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Snapshot`] when the file cannot be read or
    /// parsed, and [`SearchError::Core`] for invalid records.
    pub fn from_json_file(path: &Path) -> Result<Self, SearchError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Insert or replace an entry by id.
    ///
    /// A replacement never lowers the stored view counter.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Core`] when the entry fails validation.
    pub fn upsert_entry(&self, mut entry: KnowledgeEntry) -> Result<(), SearchError> {
        entry.validate()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SearchError::LockPoisoned("corpus entries"))?;
        if let Some(existing) = entries.iter_mut().find(|e| e.id == entry.id) {
            entry.view_count = entry.view_count.max(existing.view_count);
            *existing = entry;
        } else {
            entries.push(entry);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Core`] when the symptom fails validation.
    pub fn upsert_symptom(&self, symptom: SymptomInformation) -> Result<(), SearchError> {
        symptom.validate()?;
        let mut symptoms = self
            .symptoms
            .write()
            .map_err(|_| SearchError::LockPoisoned("corpus symptoms"))?;
        if let Some(existing) = symptoms.iter_mut().find(|s| s.id == symptom.id) {
            *existing = symptom;
        } else {
            symptoms.push(symptom);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Core`] when the disease fails validation.
    pub fn upsert_disease(&self, disease: DiseaseInformation) -> Result<(), SearchError> {
        disease.validate()?;
        let mut diseases = self
            .diseases
            .write()
            .map_err(|_| SearchError::LockPoisoned("corpus diseases"))?;
        if let Some(existing) = diseases.iter_mut().find(|d| d.id == disease.id) {
            *existing = disease;
        } else {
            diseases.push(disease);
        }
        Ok(())
    }
}

impl ContentStore for InMemoryCorpus {
    fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>, SearchError> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .map_err(|_| SearchError::LockPoisoned("corpus entries"))
    }

    fn knowledge_entry(&self, id: &str) -> Result<Option<KnowledgeEntry>, SearchError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SearchError::LockPoisoned("corpus entries"))?;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    fn symptoms(&self) -> Result<Vec<SymptomInformation>, SearchError> {
        self.symptoms
            .read()
            .map(|symptoms| symptoms.clone())
            .map_err(|_| SearchError::LockPoisoned("corpus symptoms"))
    }

    fn diseases(&self) -> Result<Vec<DiseaseInformation>, SearchError> {
        self.diseases
            .read()
            .map(|diseases| diseases.clone())
            .map_err(|_| SearchError::LockPoisoned("corpus diseases"))
    }

    fn record_view(&self, id: &str) -> Result<u64, SearchError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SearchError::LockPoisoned("corpus entries"))?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "knowledge entry".to_string(),
                id: id.to_string(),
            })?;
        entry.view_count = entry.view_count.saturating_add(1);
        Ok(entry.view_count)
    }
}
