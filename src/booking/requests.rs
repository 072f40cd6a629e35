//! Request DTOs for wizard endpoints.
//!
//! Step bodies deserialize straight into the wizard's input types; these
//! cover the remaining endpoints.

use serde::Deserialize;
use uuid::Uuid;

use super::wizard::PaymentDecision;

/// Open a wizard, resuming `session_id` when it is still known
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenSessionRequest {
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub decision: PaymentDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_decision_parse() {
        let request: PaymentRequest = serde_json::from_str(r#"{"decision": "defer"}"#).unwrap();
        assert_eq!(request.decision, PaymentDecision::Defer);
        assert!(serde_json::from_str::<PaymentRequest>(r#"{"decision": "maybe"}"#).is_err());
    }

    #[test]
    fn test_open_session_body_optional() {
        let request: OpenSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(request.session_id.is_none());
    }
}
