use async_trait::async_trait;

use crate::errors::ScanError;
use crate::models::ReputationVerdict;

/// External URL/domain reputation service.
///
/// Implementations must fail open on analysis timeouts (return an `Ok`
/// clean verdict with the `error` field set) and reserve `Err` for hard
/// failures: missing key, rejected submission, transport errors.
#[async_trait]
pub trait ReputationProvider: Send + Sync {
    /// Submit a URL for analysis and wait for the result.
    async fn check_url(&self, url: &str, api_key: &str) -> Result<ReputationVerdict, ScanError>;

    /// Look up the last known analysis for a bare domain.
    async fn check_domain(
        &self,
        domain: &str,
        api_key: &str,
    ) -> Result<ReputationVerdict, ScanError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
