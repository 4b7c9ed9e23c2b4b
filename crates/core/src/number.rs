//! Rounding helpers.

use crate::error::CoreError;
use crate::types::or_default;

/// Round to `decimals` decimal places.
///
/// A negative `decimals` is rejected for every value, present or not.
/// A missing value rounds to `0`. Ties round away from zero.
///
/// ```
/// use toolbelt_core::number::to_fixed;
///
/// assert_eq!(to_fixed(Some(3.14159), 3).unwrap(), 3.142);
/// assert_eq!(to_fixed(Some(10.995), 2).unwrap(), 11.0);
/// assert_eq!(to_fixed(None, 2).unwrap(), 0.0);
/// assert!(to_fixed(Some(3.14), -1).is_err());
/// ```
pub fn to_fixed(value: Option<f64>, decimals: i32) -> Result<f64, CoreError> {
    if decimals < 0 {
        return Err(CoreError::InvalidInput(format!(
            "decimals must be >= 0, got {decimals}"
        )));
    }
    Ok(or_default(value, |v| {
        if decimals == 0 {
            return v.round();
        }
        let multiplier = 10f64.powi(decimals);
        (v * multiplier).round() / multiplier
    }))
}

/// Round up to the next multiple of 10; `0` for a missing value.
pub fn round_up_to_nearest_10(value: Option<f64>) -> f64 {
    or_default(value, |v| (v / 10.0).ceil() * 10.0)
}

/// `floor(log10(floor(|n|)))`, i.e. the number of integer digits minus one.
///
/// Returns `0` for a missing, NaN or infinite value, and whenever the
/// integer part of `|n|` is zero.
pub fn get_order_of_magnitude_exponent(value: Option<f64>) -> i32 {
    or_default(value, |n| {
        let whole = n.abs().floor();
        if !whole.is_finite() || whole == 0.0 {
            return 0;
        }
        whole.log10().floor() as i32
    })
}
