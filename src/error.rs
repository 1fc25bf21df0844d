// Error types for devflow-check
// Fatal scan errors and per-candidate probe failures

use serde::Serialize;
use thiserror::Error;

/// Conditions that stop the scan before or while it starts.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No target URL was supplied on the command line or at the prompt.
    #[error("No URL provided")]
    MissingUrl,

    /// The target could not be parsed or lacks a scheme or host.
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single candidate produced no usable body.
///
/// These never abort the scan; they are recorded against the candidate
/// and the loop moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// The endpoint answered with something other than 200.
    #[error("HTTP {0}")]
    Status(u16),

    /// The endpoint answered 200 but the body was not JSON.
    #[error("Invalid JSON response: {0}")]
    MalformedBody(String),

    /// DNS, TLS, connection or timeout failure.
    #[error("Request failed: {0}")]
    Transport(String),
}
