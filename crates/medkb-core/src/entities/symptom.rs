use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::enums::UrgencyLevel;
use crate::errors::CoreError;

const fn default_active() -> bool {
    true
}

/// A symptom in the catalog the symptom checker matches against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SymptomInformation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Body region label, e.g. "ngực".
    #[serde(default)]
    pub body_part: Option<String>,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub possible_causes: Option<String>,
    #[serde(default)]
    pub when_to_see_doctor: Option<String>,
    #[serde(default)]
    pub home_care: Option<String>,
    #[serde(default)]
    pub related_disease_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SymptomInformation {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank id or name.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("symptom", "id", &self.id)?;
        require_non_blank("symptom", "name", &self.name)
    }
}
