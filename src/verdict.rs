// Verdict engine for devflow-check
// Decides whether a token endpoint response exposes the device code flow

use crate::error::ProbeFailure;
use crate::models::{DeviceCodeGrant, Outcome};
use serde_json::Value;

/// Classify the result of one probe.
///
/// 1. JSON object with `user_code` = VULNERABLE
/// 2. Any other JSON body (including `{}`) = UNCLASSIFIED
/// 3. Non-200 status or non-JSON body = INVALID RESPONSE
/// 4. Transport failure = NO RESPONSE
pub fn classify(response: Result<Value, ProbeFailure>) -> Outcome {
    match response {
        Ok(body) => match DeviceCodeGrant::from_body(&body) {
            Some(grant) => Outcome::Vulnerable(grant),
            None => Outcome::Unclassified(body),
        },
        Err(failure @ ProbeFailure::Transport(_)) => Outcome::NoResponse(failure),
        Err(failure) => Outcome::InvalidResponse(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_code_is_vulnerable() {
        let body = json!({
            "user_code": "ABC-123",
            "device_code": "d1",
            "verification_uri": "https://x",
            "interval": 5
        });
        match classify(Ok(body)) {
            Outcome::Vulnerable(grant) => {
                assert_eq!(grant.user_code, json!("ABC-123"));
                assert_eq!(grant.device_code, Some(json!("d1")));
                assert_eq!(grant.verification_uri, Some(json!("https://x")));
                assert_eq!(grant.interval, Some(json!(5)));
            }
            other => panic!("expected vulnerable, got {:?}", other),
        }
    }

    #[test]
    fn empty_object_is_unclassified() {
        assert_eq!(classify(Ok(json!({}))), Outcome::Unclassified(json!({})));
        let err = json!({"error": "invalid_client_id"});
        assert_eq!(classify(Ok(err.clone())), Outcome::Unclassified(err));
    }

    #[test]
    fn failures_split_by_kind() {
        assert_eq!(
            classify(Err(ProbeFailure::Status(400))),
            Outcome::InvalidResponse(ProbeFailure::Status(400))
        );
        assert!(matches!(
            classify(Err(ProbeFailure::MalformedBody("eof".into()))),
            Outcome::InvalidResponse(_)
        ));
        assert!(matches!(
            classify(Err(ProbeFailure::Transport("timeout".into()))),
            Outcome::NoResponse(_)
        ));
    }
}
