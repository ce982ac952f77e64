//! Configuration for the temporal module.

use serde::{Deserialize, Serialize};

/// Configuration for the temporal module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TemporalConfig {
    /// Page size applied when the request does not ask for one.
    pub default_page_size: u32,

    /// Hard cap on the number of entities returned per request; larger
    /// `pageSize` values are clamped to this.
    pub page_size_limit: u32,

    /// Timeout in seconds for fetching a remote JSON-LD context document.
    pub context_fetch_timeout_secs: u64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            page_size_limit: 100,
            context_fetch_timeout_secs: 10,
        }
    }
}
