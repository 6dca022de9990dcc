use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::enums::SeverityLevel;
use crate::errors::CoreError;

const fn default_active() -> bool {
    true
}

/// A disease with its characteristic symptoms.
///
/// `symptom_ids` and `SymptomInformation::related_disease_ids` describe the
/// same many-to-many relation from both ends; either side is enough to link a
/// disease to a symptom.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiseaseInformation {
    pub id: String,
    pub name: String,
    /// External classification code (ICD-10 or similar).
    #[serde(default)]
    pub icd_code: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub causes: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub prevention: Option<String>,
    #[serde(default)]
    pub complications: Option<String>,
    #[serde(default)]
    pub prognosis: Option<String>,
    #[serde(default)]
    pub severity: SeverityLevel,
    #[serde(default)]
    pub is_contagious: bool,
    #[serde(default)]
    pub is_chronic: bool,
    #[serde(default)]
    pub symptom_ids: Vec<String>,
    /// Symmetric "see also" relation between diseases.
    #[serde(default)]
    pub related_disease_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl DiseaseInformation {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank id or name.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("disease", "id", &self.id)?;
        require_non_blank("disease", "name", &self.name)
    }
}
