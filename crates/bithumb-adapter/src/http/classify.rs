/*
[INPUT]:  Raw response bodies and decoded JSON values
[OUTPUT]: Success, deferral to the transport default, or a typed domain error
[POS]:    HTTP layer - vendor status classification
[UPDATE]: When the vendor publishes new status codes
*/

use serde_json::Value;

use crate::http::error::DomainErrorKind;
use crate::http::{BithumbError, Result};

/// Status value meaning success
pub const SUCCESS_STATUS: &str = "0000";

/// Vendor status code -> error kind. Extend by adding rows.
const STATUS_TABLE: &[(&str, DomainErrorKind)] = &[
    ("5100", DomainErrorKind::FeatureRetired),
    ("5200", DomainErrorKind::AuthenticationFailed),
    ("5300", DomainErrorKind::AuthenticationFailed),
    ("5302", DomainErrorKind::PermissionDenied),
    ("5400", DomainErrorKind::ExchangeUnavailable),
    ("5500", DomainErrorKind::BadRequest),
    ("5600", DomainErrorKind::ExchangeNotice),
    ("5900", DomainErrorKind::ExchangeUnavailable),
];

pub fn lookup(code: &str) -> DomainErrorKind {
    STATUS_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, kind)| *kind)
        .unwrap_or(DomainErrorKind::Unclassified)
}

/// Pre-flight check on the raw body.
///
/// `None` means the body gives no verdict (too short or not JSON) and the
/// transport's default handling applies.
pub fn classify_body(body: &str) -> Option<Result<()>> {
    if body.trim().len() < 2 {
        return None;
    }
    let value: Value = serde_json::from_str(body).ok()?;
    Some(classify_value(&value))
}

/// Check on an already decoded response. A value without a verdict is success-shaped.
pub fn classify_value(value: &Value) -> Result<()> {
    if let Some(status) = value.get("status").and_then(status_code) {
        if status == SUCCESS_STATUS {
            return Ok(());
        }
        return Err(BithumbError::Domain {
            kind: lookup(&status),
            code: status,
            message: vendor_message(value),
        });
    }

    if let Some(error) = value.get("error").filter(|e| e.is_object()) {
        let code = error
            .get("name")
            .and_then(status_code)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(BithumbError::Domain {
            kind: lookup(&code),
            code,
            message: vendor_message(error),
        });
    }

    Ok(())
}

fn status_code(value: &Value) -> Option<String> {
    match value {
        Value::String(code) => Some(code.trim().to_string()),
        Value::Number(code) => code.as_u64().map(|code| format!("{code:04}")),
        _ => None,
    }
}

fn vendor_message(value: &Value) -> String {
    ["message", "msg"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
