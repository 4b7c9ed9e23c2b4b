//! Best-effort extraction of a human-readable message from an arbitrary
//! error payload or a typed error.

use serde_json::Value;

/// Message for an error payload of unknown shape.
///
/// - falsy payloads (absent, `null`, `false`, `0`, `""`) give `""`
/// - a string is its own message
/// - an object with a `message` key gives that message
/// - anything else is rendered as compact JSON
pub fn get_error_message(error: Option<&Value>) -> String {
    let Some(error) = error.filter(|e| !is_falsy(e)) else {
        return String::new();
    };

    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => error.to_string(),
        },
        other => other.to_string(),
    }
}

/// Message of a typed error: its `Display` text.
pub fn get_error_message_from(error: &dyn std::error::Error) -> String {
    error.to_string()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
