//! Settings Model
//!
//! Keyed opaque configuration blobs, e.g. `payment_config`. The server
//! stores them verbatim; last write wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Unique settings key
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub updated_at: i64,
}
