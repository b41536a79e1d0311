//! Typed parameter extraction from a flat `serde_json::Value` object.
//!
//! Generators receive one flat JSON object per pass. These helpers pull out
//! typed fields and never fail: a missing or mistyped key falls back to the
//! supplied default, so any parameter vector produces a usable generator.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, or `default` if missing/mistyped.
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, or `default` if the value is
/// missing, negative, fractional, or not a number.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, or `default` if missing/mistyped.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, or `default` if missing/mistyped.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}
