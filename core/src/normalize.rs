//! Normalization of the backend's remote action reply.
//!
//! # Design
//! The reply is `{result, failMsg, responseString}`, but `responseString` has
//! been observed both as a plain string and as a structured error record.
//! Decoding happens in two passes: the envelope is parsed into a
//! `serde_json::Value` first, then `responseString` is resolved in a fixed
//! order (structured record, then string, then absent). Only an envelope that
//! cannot be decoded at all is an error.
//!
//! Member names match case-insensitively, an exact match taking precedence,
//! and `null` members are skipped. A bare `null` body is an empty reply.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::types::{ActionOutcome, ErrorDetail, ResponseDetail};

const ENVELOPE_KEYS: &[&str] = &["result", "failMsg", "responseString"];
const DETAIL_KEYS: &[&str] = &[
    "errorSubCode",
    "systemName",
    "functionName",
    "errorMessage",
    "errorCode",
    "serviceName",
];

/// Wire envelope. `null` and missing string members read as empty.
#[derive(Debug, Deserialize)]
struct RawActionResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "failMsg")]
    fail_msg: Option<String>,
    #[serde(default, rename = "responseString")]
    response_string: Value,
}

/// Decode a raw reply body into an [`ActionOutcome`].
///
/// Fails with [`ApiError::Decode`] when the body is not JSON, is neither a
/// JSON object nor `null`, or carries non-string `result` / `failMsg`
/// members.
pub fn normalize(body: &[u8]) -> Result<ActionOutcome, ApiError> {
    let envelope: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let envelope = match envelope {
        Value::Object(members) => canonical_members(members, ENVELOPE_KEYS),
        Value::Null => return Ok(ActionOutcome::default()),
        other => {
            return Err(ApiError::Decode(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    let raw: RawActionResponse = serde_json::from_value(Value::Object(envelope))
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(ActionOutcome {
        result_code: raw.result.unwrap_or_default(),
        failure_message: raw.fail_msg.unwrap_or_default(),
        detail: resolve_detail(raw.response_string),
    })
}

/// Structured first, plain string second, absent otherwise.
fn resolve_detail(value: Value) -> ResponseDetail {
    match value {
        Value::Object(members) => {
            let members = Value::Object(canonical_members(members, DETAIL_KEYS));
            ErrorDetail::deserialize(&members)
                .map(ResponseDetail::Structured)
                .unwrap_or_default()
        }
        Value::String(message) => ResponseDetail::Message(message),
        _ => ResponseDetail::Absent,
    }
}

/// Renames members that match one of `names` ignoring ASCII case, and drops
/// `null` members. When both `result` and `Result` are present the exact
/// spelling wins.
fn canonical_members(members: Map<String, Value>, names: &[&str]) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in members {
        if value.is_null() {
            continue;
        }
        match names.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
            Some(name) if **name != key => {
                out.entry(*name).or_insert(value);
            }
            _ => {
                out.insert(key, value);
            }
        }
    }
    out
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
