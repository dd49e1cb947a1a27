use serde::{Deserialize, Serialize};

/// Timeout budget for external reputation calls.
///
/// `per_request_ms` bounds each individual HTTP call; `overall_timeout_ms`
/// bounds the whole submit-then-poll cycle for one URL from submission
/// start. When the overall budget lapses before the vendor completes the
/// analysis, the client fails open (see `VirusTotalClient`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationTimeouts {
    pub per_request_ms: u64,
    pub poll_interval_ms: u64,
    pub overall_timeout_ms: u64,
}

impl Default for ReputationTimeouts {
    fn default() -> Self {
        Self {
            per_request_ms: 10_000,
            poll_interval_ms: 2_000,
            overall_timeout_ms: 30_000,
        }
    }
}
