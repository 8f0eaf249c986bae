//! Key-casing transform for JSON value trees.
//!
//! The Connect API speaks camelCase on the wire while this library exposes
//! snake_case throughout. Outgoing bodies are rewritten with
//! [`camelize_keys`] just before signing, and incoming bodies with
//! [`snakeify_keys`] just after receipt, so neither convention leaks across
//! the boundary.
//!
//! Only mapping keys are rewritten. Values, including string values that
//! happen to look like identifiers, pass through untouched. Arrays keep their
//! order; object key order is not significant at any layer.

use serde_json::Map;
use serde_json::Value;

/// Rewrite every mapping key in `value` to lower camelCase, recursively.
pub fn camelize_keys(value: Value) -> Value {
    transform_keys(value, to_camel_case)
}

/// Rewrite every mapping key in `value` to snake_case, recursively.
pub fn snakeify_keys(value: Value) -> Value {
    transform_keys(value, to_snake_case)
}

fn transform_keys(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(f(&k), transform_keys(v, f));
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| transform_keys(v, f)).collect())
        }
        scalar => scalar,
    }
}

/// Convert a snake_case identifier to lower camelCase.
///
/// The first segment is kept as-is, so already-camelCase input passes through
/// unchanged.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a camelCase identifier to snake_case.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
