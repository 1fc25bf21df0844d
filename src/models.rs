// Core data models for devflow-check

use crate::error::ProbeFailure;
use serde::Serialize;
use serde_json::Value;

/// Device authorization fields returned by an exposed connected app.
///
/// Values are kept as raw JSON so they are reported exactly as the
/// server sent them (`interval` is usually a number, the rest strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCodeGrant {
    pub user_code: Value,
    pub device_code: Option<Value>,
    pub verification_uri: Option<Value>,
    pub interval: Option<Value>,
}

impl DeviceCodeGrant {
    /// Pull the grant fields out of a token endpoint body.
    /// Returns `None` unless the body is an object carrying `user_code`.
    pub fn from_body(body: &Value) -> Option<Self> {
        let obj = body.as_object()?;
        let user_code = obj.get("user_code")?.clone();
        Some(Self {
            user_code,
            device_code: obj.get("device_code").cloned(),
            verification_uri: obj.get("verification_uri").cloned(),
            interval: obj.get("interval").cloned(),
        })
    }
}

/// Render a JSON field for console output, `N/A` when absent.
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Classification of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// A user code was issued without any device registration check.
    Vulnerable(DeviceCodeGrant),
    /// HTTP 200 with JSON, but no `user_code` in it.
    Unclassified(Value),
    /// The server answered, but not with a usable 200 JSON body.
    InvalidResponse(ProbeFailure),
    /// The request never completed.
    NoResponse(ProbeFailure),
}

impl Outcome {
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, Outcome::Vulnerable(_))
    }
}

/// Outcome for a single client ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub client_id: String,
    pub outcome: Outcome,
}

impl ScanResult {
    pub fn new(client_id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            client_id: client_id.into(),
            outcome,
        }
    }
}

/// All results of one run against one target, in candidate order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: String,
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    pub fn new(target: impl Into<String>, results: Vec<ScanResult>) -> Self {
        Self {
            target: target.into(),
            results,
        }
    }

    pub fn tested(&self) -> usize {
        self.results.len()
    }

    pub fn vulnerable(&self) -> impl Iterator<Item = (&str, &DeviceCodeGrant)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Vulnerable(grant) => Some((r.client_id.as_str(), grant)),
            _ => None,
        })
    }

    pub fn vulnerable_count(&self) -> usize {
        self.vulnerable().count()
    }

    /// Everything that did not hand out a user code, failures included.
    pub fn secure_count(&self) -> usize {
        self.tested() - self.vulnerable_count()
    }
}
