//! Response to result mapping.

use http::StatusCode;
use paylink_core::{Error, Result};
use serde_json::Value;

/// Classify a decoded response by status code.
///
/// - Status `< 400` with no projection key: the whole body.
/// - Status `< 400` with a projection key: `body[key]`; a missing key yields
///   `Value::Null` rather than an error, mirroring the lenient behavior of
///   the verifying service.
/// - Status `>= 400`: an API error built from `body["message"]`,
///   `body["info"]` and the status code.
///
/// The body is expected to have already been through the inbound key-casing
/// transform; `message` and `info` are single lowercase words, so they read
/// the same in either convention.
pub(crate) fn unwrap_response(status: StatusCode, body: Value, key: Option<&str>) -> Result<Value> {
    if status.as_u16() < 400 {
        return Ok(match key {
            None => body,
            Some(k) => body.get(k).cloned().unwrap_or(Value::Null),
        });
    }

    let message = body
        .get("message")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let info = body.get("info").cloned().filter(|v| !v.is_null());
    Err(Error::api(status, message, info))
}
