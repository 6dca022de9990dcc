//! Entity structs for the medical knowledge content.
//!
//! Content entities are owned by the external authoring workflow; medkb only
//! reads active records and bumps knowledge-entry view counters. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema` so a corpus snapshot can
//! be loaded from JSON and validated against a schema.

mod disease;
mod knowledge;
mod search_log;
mod symptom;

pub use disease::DiseaseInformation;
pub use knowledge::{KnowledgeCategory, KnowledgeEntry};
pub use search_log::SearchLogRecord;
pub use symptom::SymptomInformation;

use crate::errors::CoreError;

/// Reject blank identifiers and names shared by every content entity.
pub(crate) fn require_non_blank(entity: &str, field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity}: `{field}` must not be empty"
        )));
    }
    Ok(())
}
