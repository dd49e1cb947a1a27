use serde::{Deserialize, Serialize};

use super::indicator::Indicator;
use super::reputation::ReputationVerdict;

/// Aggregate result of scanning one paste.
///
/// `clean` is derived by [`ScanVerdict::assemble`] from the threat and
/// sensitive-data lists; it is never set independently. The caller
/// serializes the whole verdict alongside its paste record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanVerdict {
    pub clean: bool,
    /// Human-readable threat entries, local heuristics plus flagged
    /// reputation results.
    pub threats: Vec<String>,
    /// Sensitive-data category labels from the local detector.
    pub sensitive_data: Vec<String>,
    /// Non-blocking notices: indicator counts, unconfigured service,
    /// per-indicator scan failures, cap overflows.
    pub info: Vec<String>,
    /// Every indicator extracted from the text, scanned or not.
    pub indicators: Vec<Indicator>,
    /// Reputation results for the indicators that were actually checked.
    pub reputation_results: Vec<ReputationVerdict>,
}

impl ScanVerdict {
    /// Build a verdict, deriving `clean` from the two finding lists.
    pub fn assemble(
        threats: Vec<String>,
        sensitive_data: Vec<String>,
        info: Vec<String>,
        indicators: Vec<Indicator>,
        reputation_results: Vec<ReputationVerdict>,
    ) -> Self {
        let clean = threats.is_empty() && sensitive_data.is_empty();
        Self {
            clean,
            threats,
            sensitive_data,
            info,
            indicators,
            reputation_results,
        }
    }

    /// Policy check used by the paste-creation flow: a verdict blocks
    /// creation when anything was found and the submitter did not force.
    pub fn blocks_creation(&self, force: bool) -> bool {
        (!self.sensitive_data.is_empty() || !self.threats.is_empty()) && !force
    }
}
