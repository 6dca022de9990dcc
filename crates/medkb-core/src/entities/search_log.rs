use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An append-only record of one search call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchLogRecord {
    /// Raw query string as the caller sent it.
    pub query: String,
    pub results_count: usize,
    /// Wall-clock duration of the call in milliseconds.
    pub response_time_ms: Option<f64>,
    pub created_at: DateTime<Utc>,
}
