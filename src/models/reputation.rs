use serde::{Deserialize, Serialize};

use super::indicator::IndicatorKind;

/// Per-indicator result from the external reputation service.
///
/// The three booleans are kept mutually consistent by the constructors:
/// `clean` is true exactly when the indicator is neither malicious nor
/// suspicious. Build values through [`ReputationVerdict::from_counts`] or
/// the `clean_*` helpers, never by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationVerdict {
    /// The URL or domain that was checked.
    pub indicator: String,
    pub kind: IndicatorKind,
    pub malicious: bool,
    pub suspicious: bool,
    pub clean: bool,
    /// Number of engines flagging the indicator (malicious + suspicious).
    pub positives: u32,
    /// Total engines consulted across all categories.
    pub total: u32,
    /// Names of engines whose category was anything other than "harmless".
    pub detections: Vec<String>,
    /// When the vendor last analyzed the indicator, RFC 3339.
    pub scan_date: Option<String>,
    /// Set when the lookup failed open (e.g. analysis never completed in
    /// time). The verdict is still well-formed and counts as clean.
    pub error: Option<String>,
}

impl ReputationVerdict {
    /// Derive a verdict from per-category engine counts.
    pub fn from_counts(
        indicator: impl Into<String>,
        kind: IndicatorKind,
        malicious_count: u32,
        suspicious_count: u32,
        total: u32,
        detections: Vec<String>,
        scan_date: Option<String>,
    ) -> Self {
        let malicious = malicious_count > 0;
        let suspicious = suspicious_count > 0;
        Self {
            indicator: indicator.into(),
            kind,
            malicious,
            suspicious,
            clean: !malicious && !suspicious,
            positives: malicious_count + suspicious_count,
            total,
            detections,
            scan_date,
            error: None,
        }
    }

    /// Clean verdict with zero engines consulted. Used when the vendor has
    /// no record of the indicator (absence of a record is not risk).
    pub fn clean_unknown(indicator: impl Into<String>, kind: IndicatorKind) -> Self {
        Self::from_counts(indicator, kind, 0, 0, 0, Vec::new(), None)
    }

    /// Fail-open verdict: the analysis did not complete in time, so the
    /// indicator is reported clean with the reason recorded in `error`.
    pub fn clean_incomplete(
        indicator: impl Into<String>,
        kind: IndicatorKind,
        reason: impl Into<String>,
    ) -> Self {
        let mut verdict = Self::clean_unknown(indicator, kind);
        verdict.error = Some(reason.into());
        verdict
    }

    /// True when the indicator should contribute a threat entry.
    pub fn is_flagged(&self) -> bool {
        self.malicious || self.suspicious
    }
}
