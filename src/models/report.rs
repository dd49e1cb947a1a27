use serde::{Deserialize, Serialize};

/// Output of the local pattern detector: category labels only, never the
/// matched text, so secrets cannot leak into logs or stored verdicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorReport {
    /// Sensitive-data categories found (e.g. "Email address").
    pub sensitive_data: Vec<String>,
    /// Local threat heuristics. URL-presence entries are stripped by the
    /// orchestrator; URL risk belongs to the reputation layer.
    pub threats: Vec<String>,
}

impl DetectorReport {
    pub fn is_empty(&self) -> bool {
        self.sensitive_data.is_empty() && self.threats.is_empty()
    }
}
