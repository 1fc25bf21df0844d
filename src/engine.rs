// HTTP engine for devflow-check
// Sends one device code request per client ID with reqwest

use crate::config::{ScanConfig, TOKEN_PATH};
use crate::error::{ProbeFailure, ScanError};
use crate::target::ScanTarget;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Something that can ask a token endpoint for a device code.
#[async_trait]
pub trait Probe {
    /// Issue exactly one request for `client_id`. No retries.
    async fn probe(&self, target: &ScanTarget, client_id: &str) -> Result<Value, ProbeFailure>;
}

pub struct ProbeEngine {
    pub client: Client,
    scope: String,
}

impl ProbeEngine {
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            scope: config.scope.clone(),
        })
    }
}

#[async_trait]
impl Probe for ProbeEngine {
    async fn probe(&self, target: &ScanTarget, client_id: &str) -> Result<Value, ProbeFailure> {
        let url = target.endpoint(TOKEN_PATH);
        let form = [
            ("scope", self.scope.as_str()),
            ("response_type", "device_code"),
            ("client_id", client_id),
        ];
        debug!(%url, client_id, "sending device code request");

        let resp = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProbeFailure::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ProbeFailure::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProbeFailure::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ProbeFailure::MalformedBody(e.to_string()))
    }
}
