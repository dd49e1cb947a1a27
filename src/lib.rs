//! Content security scanning pipeline for pastebin submissions.
//!
//! Before a paste is persisted, its text runs through three stages:
//! local regex detection of secrets/PII ([`detector`]), URL/domain
//! extraction ([`extractor`]), and reputation lookups for a capped subset
//! of the extracted indicators ([`reputation`]). The
//! [`pipeline::ScanOrchestrator`] merges all signals into one
//! [`models::ScanVerdict`] and, for the creation flow, a block/allow
//! decision with a force override.
//!
//! The surrounding application owns routing, storage, sessions, and API
//! key resolution; this crate only sees paste text and a resolved key.

pub mod config;
pub mod detector;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod reputation;
pub mod utils;

pub use config::ReputationTimeouts;
pub use errors::ScanError;
pub use models::{DetectorReport, Indicator, IndicatorKind, ReputationVerdict, ScanVerdict};
pub use pipeline::ScanOrchestrator;
pub use reputation::{ReputationProvider, VirusTotalClient};
