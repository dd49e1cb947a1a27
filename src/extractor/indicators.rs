use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Canonical absolute-URL pattern. The detector's URL-presence check
/// borrows this same regex so the two layers can never disagree about
/// what counts as a URL.
pub(crate) static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).unwrap());

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b").unwrap()
});

/// Characters commonly glued onto a URL by surrounding prose.
const TRAILING_PUNCTUATION: &[char] = &[')', ',', '.', ';'];

/// Pulls URLs and bare domains out of paste text. Pure functions, no I/O.
pub struct IndicatorExtractor;

impl IndicatorExtractor {
    /// Extract absolute URLs, normalized by stripping trailing punctuation,
    /// deduplicated in first-seen order.
    pub fn extract_urls(text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for m in URL_PATTERN.find_iter(text) {
            let url = m
                .as_str()
                .trim_end_matches(TRAILING_PUNCTUATION)
                .to_string();
            if url.is_empty() {
                continue;
            }
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }

        debug!(count = urls.len(), "extracted URLs");
        urls
    }

    /// Extract bare domains: lower-cased, trailing dot stripped,
    /// deduplicated in first-seen order. A domain already present inside
    /// one of `urls` is dropped so the same network location is never
    /// scanned twice (once as URL, once as domain).
    pub fn extract_domains(text: &str, urls: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut domains = Vec::new();

        for m in DOMAIN_PATTERN.find_iter(text) {
            let domain = m.as_str().to_lowercase();
            let domain = domain.trim_end_matches('.').to_string();
            if domain.is_empty() {
                continue;
            }
            if urls.iter().any(|u| u.to_lowercase().contains(&domain)) {
                continue;
            }
            if seen.insert(domain.clone()) {
                domains.push(domain);
            }
        }

        debug!(count = domains.len(), "extracted domains");
        domains
    }
}
