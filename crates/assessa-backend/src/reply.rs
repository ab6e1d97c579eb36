//! Reply classification.
//!
//! The backend signals validation failures with a `{message}` body, often
//! with a 2xx status. That shape is recognised before the expected type is
//! decoded.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BackendError;

/// The `message` of a rejection body, if `body` is one.
pub fn rejection_message(body: &Value) -> Option<&str> {
    body.as_object()?.get("message")?.as_str()
}

fn parse_body(path: &str, bytes: &[u8]) -> Result<Value, BackendError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|source| BackendError::Decode {
        path: path.to_string(),
        source,
    })
}

fn check_status(path: &str, status: u16) -> Result<(), BackendError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(BackendError::NotFound {
            path: path.to_string(),
        }),
        _ => Err(BackendError::Status {
            status,
            path: path.to_string(),
        }),
    }
}

/// Decode a reply that may be a rejection. A `{message}` body wins over
/// the status code unless the backend failed outright.
pub fn decode<T: DeserializeOwned>(path: &str, status: u16, bytes: &[u8]) -> Result<T, BackendError> {
    let body = parse_body(path, bytes).or_else(|e| match status {
        200..=299 => Err(e),
        _ => Ok(Value::Null),
    })?;

    if status < 500 {
        if let Some(message) = rejection_message(&body) {
            return Err(BackendError::Rejected(message.to_string()));
        }
    }
    check_status(path, status)?;

    serde_json::from_value(body).map_err(|source| BackendError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Decode a reply whose body is informational only, such as a delete
/// confirmation. Only the status code is checked.
pub fn confirm(path: &str, status: u16, bytes: &[u8]) -> Result<Value, BackendError> {
    check_status(path, status)?;
    Ok(parse_body(path, bytes).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_body_is_a_rejection_even_on_200() {
        let body = r#"{"message":"部门已存在"}"#.as_bytes();
        let err = decode::<Value>("clubs/create", 200, body).unwrap_err();
        assert!(matches!(err, BackendError::Rejected(m) if m == "部门已存在"));
    }

    #[test]
    fn message_field_must_be_a_string() {
        let body = json!({ "message": 3 });
        assert_eq!(rejection_message(&body), None);
        assert_eq!(rejection_message(&json!(["message"])), None);
    }

    #[test]
    fn not_found_and_server_errors_map_to_status() {
        assert!(matches!(
            decode::<Value>("tests/findOne/x", 404, b""),
            Err(BackendError::NotFound { .. })
        ));
        assert!(matches!(
            decode::<Value>("tests/findAll", 500, br#"{"message":"boom"}"#),
            Err(BackendError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn confirmation_ignores_the_body() {
        assert_eq!(confirm("clubs/delete/name/x", 200, b"").unwrap(), Value::Null);
        assert_eq!(
            confirm("clubs/delete/name/x", 200, br#"{"message":"deleted"}"#).unwrap(),
            json!({ "message": "deleted" })
        );
    }
}
