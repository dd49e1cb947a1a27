use serde::{Deserialize, Serialize};

/// Kind of network indicator extracted from paste text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Url,
    Domain,
}

impl IndicatorKind {
    /// Human-readable noun used when rendering threat labels.
    pub fn noun(&self) -> &'static str {
        match self {
            IndicatorKind::Url => "URL",
            IndicatorKind::Domain => "domain",
        }
    }
}

/// A URL or bare domain pulled out of submitted text for reputation checking.
///
/// Deduplicated within one scan; a domain already covered by an extracted
/// URL never appears as a standalone indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub value: String,
    pub kind: IndicatorKind,
}

impl Indicator {
    pub fn url(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IndicatorKind::Url,
        }
    }

    pub fn domain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IndicatorKind::Domain,
        }
    }
}
