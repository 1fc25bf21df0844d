// Target URL handling for devflow-check
// Rewrites Lightning hostnames to the API domain and validates the result

use crate::error::ScanError;
use reqwest::Url;
use std::fmt;

const LIGHTNING_DOMAIN: &str = "lightning.force.com";
const API_DOMAIN: &str = "my.salesforce.com";

/// Rewrite a Lightning Experience URL to the instance's API domain.
///
/// Token requests against `*.lightning.force.com` never reach the OAuth
/// endpoints, so `https://acme.lightning.force.com` becomes
/// `https://acme.my.salesforce.com`. Anything else passes through.
pub fn normalize_url(url: &str) -> String {
    if url.contains(LIGHTNING_DOMAIN) {
        url.replace(LIGHTNING_DOMAIN, API_DOMAIN)
    } else {
        url.to_string()
    }
}

/// A validated base URL with scheme and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    base: String,
    /// Set when normalization changed the input.
    original: Option<String>,
}

impl ScanTarget {
    /// Trim, normalize and validate user input.
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ScanError::MissingUrl);
        }

        let base = normalize_url(trimmed);
        let parsed = Url::parse(&base).map_err(|e| ScanError::InvalidUrl(e.to_string()))?;
        if parsed.scheme().is_empty() || parsed.host_str().map_or(true, str::is_empty) {
            return Err(ScanError::InvalidUrl(format!("{} has no scheme or host", base)));
        }

        let original = (base != trimmed).then(|| trimmed.to_string());
        Ok(Self { base, original })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// The pre-normalization URL, if a rewrite took place.
    pub fn original_url(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
