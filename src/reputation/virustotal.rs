use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ReputationTimeouts;
use crate::errors::ScanError;
use crate::models::{IndicatorKind, ReputationVerdict};

use super::provider::ReputationProvider;

/// VirusTotal v3 reputation client.
///
/// URL checks are a two-phase protocol: submit the URL for analysis, then
/// poll the analysis until it completes. Domain checks are a single lookup
/// of the vendor's last known analysis. The API key is supplied per call;
/// the client holds no credentials.
pub struct VirusTotalClient {
    client: Client,
    base_url: String,
    timeouts: ReputationTimeouts,
}

impl VirusTotalClient {
    pub fn new(timeouts: ReputationTimeouts) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://www.virustotal.com/api/v3".to_string(),
            timeouts,
        }
    }

    /// Point the client at a different endpoint (local stub in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn per_request(&self) -> Duration {
        Duration::from_millis(self.timeouts.per_request_ms)
    }

    /// Submit a URL for analysis and return the opaque analysis id.
    async fn submit_url(&self, url: &str, api_key: &str) -> Result<String, ScanError> {
        let resp = self
            .client
            .post(format!("{}/urls", self.base_url))
            .header("x-apikey", api_key)
            .form(&[("url", url)])
            .timeout(self.per_request())
            .send()
            .await
            .map_err(|e| ScanError::Network(format!("URL submission failed: {}", e)))?;

        let status = resp.status();
        if status == 429 {
            return Err(ScanError::RateLimit("reputation API rate limit exceeded".into()));
        }
        if status == 401 {
            return Err(ScanError::Config("invalid reputation API key".into()));
        }
        if !status.is_success() {
            return Err(ScanError::Submission(format!(
                "URL submission returned status {}",
                status
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ScanError::Submission(format!("unreadable submission response: {}", e)))?;

        let analysis_id = data["data"]["id"]
            .as_str()
            .ok_or_else(|| ScanError::Submission("no analysis id in submission response".into()))?
            .to_string();

        debug!(analysis_id = %analysis_id, "URL submitted for analysis");
        Ok(analysis_id)
    }

    /// Fetch one poll of the analysis. Returns the `data.attributes` object.
    async fn fetch_analysis(&self, analysis_id: &str, api_key: &str) -> Result<Value, ScanError> {
        let resp = self
            .client
            .get(format!("{}/analyses/{}", self.base_url, analysis_id))
            .header("x-apikey", api_key)
            .timeout(self.per_request())
            .send()
            .await
            .map_err(|e| ScanError::Network(format!("analysis poll failed: {}", e)))?;

        let status = resp.status();
        if status == 429 {
            return Err(ScanError::RateLimit("reputation API rate limit exceeded".into()));
        }
        if !status.is_success() {
            return Err(ScanError::Lookup(format!(
                "analysis poll returned status {}",
                status
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ScanError::Lookup(format!("unreadable analysis response: {}", e)))?;
        Ok(data["data"]["attributes"].clone())
    }

    /// Derive a verdict from a stats object plus per-engine results.
    ///
    /// Category counts come from `stats`; `total` sums every category so
    /// it reflects all engines consulted. Any engine whose category is not
    /// "harmless" lands in `detections`.
    fn derive_verdict(
        indicator: &str,
        kind: IndicatorKind,
        stats: &Value,
        results: &Value,
        scan_epoch: Option<i64>,
    ) -> ReputationVerdict {
        let count = |key: &str| stats[key].as_u64().unwrap_or(0) as u32;
        let malicious = count("malicious");
        let suspicious = count("suspicious");

        let total = stats
            .as_object()
            .map(|m| m.values().map(|v| v.as_u64().unwrap_or(0) as u32).sum())
            .unwrap_or(0);

        let mut detections = Vec::new();
        if let Some(engines) = results.as_object() {
            for (engine, result) in engines {
                let category = result["category"].as_str().unwrap_or("harmless");
                if category != "harmless" {
                    let name = result["engine_name"].as_str().unwrap_or(engine);
                    detections.push(name.to_string());
                }
            }
        }

        let scan_date = scan_epoch
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.to_rfc3339());

        ReputationVerdict::from_counts(
            indicator,
            kind,
            malicious,
            suspicious,
            total,
            detections,
            scan_date,
        )
    }
}

#[async_trait]
impl ReputationProvider for VirusTotalClient {
    async fn check_url(&self, url: &str, api_key: &str) -> Result<ReputationVerdict, ScanError> {
        if api_key.is_empty() {
            return Err(ScanError::Config("reputation API key is not configured".into()));
        }

        let analysis_id = self.submit_url(url, api_key).await?;
        let deadline = Instant::now() + Duration::from_millis(self.timeouts.overall_timeout_ms);

        loop {
            let attributes = self.fetch_analysis(&analysis_id, api_key).await?;
            let status = attributes["status"].as_str().unwrap_or("");

            if status == "completed" {
                let stats = &attributes["stats"];
                let results = &attributes["results"];
                if results.as_object().map(|m| !m.is_empty()).unwrap_or(false) {
                    let verdict = Self::derive_verdict(
                        url,
                        IndicatorKind::Url,
                        stats,
                        results,
                        attributes["date"].as_i64(),
                    );
                    debug!(
                        url = %url,
                        positives = verdict.positives,
                        total = verdict.total,
                        "URL analysis completed"
                    );
                    return Ok(verdict);
                }
                // Completed but no per-engine results: treat like a timeout
                // and fail open rather than guessing.
                warn!(url = %url, "analysis completed without engine results");
                return Ok(ReputationVerdict::clean_incomplete(
                    url,
                    IndicatorKind::Url,
                    "analysis returned no engine results",
                ));
            }

            if Instant::now() >= deadline {
                // Fail open: a slow reputation backend must never block
                // paste creation or force a false positive.
                warn!(url = %url, timeout_ms = self.timeouts.overall_timeout_ms, "analysis poll deadline exceeded");
                return Ok(ReputationVerdict::clean_incomplete(
                    url,
                    IndicatorKind::Url,
                    format!(
                        "analysis not completed within {}ms",
                        self.timeouts.overall_timeout_ms
                    ),
                ));
            }

            tokio::time::sleep(Duration::from_millis(self.timeouts.poll_interval_ms)).await;
        }
    }

    async fn check_domain(
        &self,
        domain: &str,
        api_key: &str,
    ) -> Result<ReputationVerdict, ScanError> {
        if api_key.is_empty() {
            return Err(ScanError::Config("reputation API key is not configured".into()));
        }

        let resp = self
            .client
            .get(format!("{}/domains/{}", self.base_url, domain))
            .header("x-apikey", api_key)
            .timeout(self.per_request())
            .send()
            .await
            .map_err(|e| ScanError::Network(format!("domain lookup failed: {}", e)))?;

        let status = resp.status();
        if status == 404 {
            // No record for this domain; absence is not evidence of risk.
            debug!(domain = %domain, "no reputation record for domain");
            return Ok(ReputationVerdict::clean_unknown(domain, IndicatorKind::Domain));
        }
        if status == 429 {
            return Err(ScanError::RateLimit("reputation API rate limit exceeded".into()));
        }
        if status == 401 {
            return Err(ScanError::Config("invalid reputation API key".into()));
        }
        if !status.is_success() {
            return Err(ScanError::Lookup(format!(
                "domain lookup returned status {}",
                status
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ScanError::Lookup(format!("unreadable domain response: {}", e)))?;

        let attributes = &data["data"]["attributes"];
        let verdict = Self::derive_verdict(
            domain,
            IndicatorKind::Domain,
            &attributes["last_analysis_stats"],
            &attributes["last_analysis_results"],
            attributes["last_analysis_date"].as_i64(),
        );
        debug!(
            domain = %domain,
            positives = verdict.positives,
            total = verdict.total,
            "domain lookup completed"
        );
        Ok(verdict)
    }

    fn provider_name(&self) -> &str {
        "virustotal"
    }
}
