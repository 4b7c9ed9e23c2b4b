//! Shared type aliases and nullish guards.
//!
//! Dynamic values are carried as [`serde_json::Value`]. An absent value is
//! `None` (undefined), an explicit null is `Some(Value::Null)`.

use serde_json::Value;

/// Seconds since the Unix epoch, no timezone attached.
pub type UnixTimestamp = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// True for an absent value or an explicit JSON null.
pub fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// True only for JSON numbers.
///
/// JSON cannot represent NaN, so every `Value::Number` is a real number.
pub fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)))
}

/// True only for JSON strings, including the empty string.
pub fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

/// Apply `f` to a present value, or return the neutral default of the
/// output type (`0`, `false`, `""`, ...) when the value is absent.
///
/// ```
/// use toolbelt_core::types::or_default;
///
/// assert_eq!(or_default(Some(2.0), |v: f64| v * 10.0), 20.0);
/// assert_eq!(or_default(None, |v: f64| v * 10.0), 0.0);
/// assert!(!or_default(None::<u16>, |s| s >= 200));
/// ```
pub fn or_default<T, U, F>(value: Option<T>, f: F) -> U
where
    U: Default,
    F: FnOnce(T) -> U,
{
    value.map_or_else(U::default, f)
}

/// Does nothing. Handy as a placeholder callback.
pub fn no_op() {}
