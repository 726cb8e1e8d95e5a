//! Request and response envelopes shared by every cloud call.
//!
//! Responses are decoded into an [`Envelope`] before any method-specific logic
//! runs, so a non-zero `error_code` can never leak its `result` to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CloudError, Result};

/// Body of every request: a method name plus its parameters.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self { method, params }
    }
}

/// Raw application envelope as sent by the server.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    error_code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    result: Option<Value>,
}

/// Decoded response: either a payload or an application failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `error_code == 0`; the payload is `Value::Null` when `result` was absent
    Success(Value),
    /// Any non-zero `error_code`
    Failure { code: i64, message: String },
}

impl Envelope {
    /// Decode a response body.
    ///
    /// Fails with [`CloudError::Protocol`] when the body is not an envelope.
    pub fn decode(body: &str) -> Result<Self> {
        let raw: RawEnvelope = serde_json::from_str(body)
            .map_err(|e| CloudError::protocol(format!("malformed response envelope: {}", e)))?;

        if raw.error_code == 0 {
            return Ok(Self::Success(raw.result.unwrap_or(Value::Null)));
        }

        Ok(Self::Failure {
            code: raw.error_code,
            message: raw.msg.unwrap_or_default(),
        })
    }

    /// Returns the payload, mapping a failure through `on_failure`.
    pub fn into_result(self, on_failure: impl FnOnce(i64, String) -> CloudError) -> Result<Value> {
        match self {
            Self::Success(result) => Ok(result),
            Self::Failure { code, message } => Err(on_failure(code, message)),
        }
    }
}

/// True for `null`, `{}`, `[]` and `""`.
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_method_and_params() {
        let request = RpcRequest::new("getDeviceList", json!({}));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "method": "getDeviceList", "params": {} }));
    }

    #[test]
    fn test_decode_success() {
        let envelope = Envelope::decode(r#"{"error_code":0,"result":{"token":"T1"}}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(json!({ "token": "T1" })));
    }

    #[test]
    fn test_decode_success_without_result() {
        let envelope = Envelope::decode(r#"{"error_code":0}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(Value::Null));
    }

    #[test]
    fn test_decode_failure_hides_result() {
        let envelope =
            Envelope::decode(r#"{"error_code":-20651,"msg":"Token expired","result":{"x":1}}"#)
                .unwrap();
        assert_eq!(
            envelope,
            Envelope::Failure {
                code: -20651,
                message: "Token expired".to_string()
            }
        );

        let err = envelope.into_result(CloudError::request).unwrap_err();
        assert_eq!(err.error_code(), Some(-20651));
    }

    #[test]
    fn test_decode_failure_without_message() {
        let envelope = Envelope::decode(r#"{"error_code":1}"#).unwrap();
        assert_eq!(
            envelope,
            Envelope::Failure {
                code: 1,
                message: String::new()
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_envelope() {
        let err = Envelope::decode(r#"{"result":{}}"#).unwrap_err();
        assert!(matches!(err, CloudError::Protocol(_)));

        let err = Envelope::decode("<html>oops</html>").unwrap_err();
        assert!(matches!(err, CloudError::Protocol(_)));
    }

    #[test]
    fn test_is_empty_result() {
        assert!(is_empty_result(&Value::Null));
        assert!(is_empty_result(&json!({})));
        assert!(is_empty_result(&json!([])));
        assert!(is_empty_result(&json!("")));
        assert!(!is_empty_result(&json!({ "alias": "Lamp" })));
        assert!(!is_empty_result(&json!(0)));
    }
}
