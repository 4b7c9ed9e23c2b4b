//! Physical unit conversions via fixed multiplicative factors.
//!
//! Every conversion maps a missing value to `0`.

use crate::types::or_default;

/// m³/s to US gallons per minute.
pub const M3PS_TO_GPM: f64 = 15850.3;

/// Pascals to feet of water head.
pub const PA_TO_FT: f64 = 0.000334553;

/// Watts to mechanical horsepower.
pub const W_TO_HP: f64 = 0.00134102;

/// Meters to inches.
pub const M_TO_INCHES: f64 = 39.3701;

/// Hz to RPM (synchronous speed).
pub const HZ_TO_RPM: f64 = 60.0;

pub fn from_m3ps_to_gpm(value: Option<f64>) -> f64 {
    or_default(value, |v| v * M3PS_TO_GPM)
}

pub fn from_pa_to_ft(value: Option<f64>) -> f64 {
    or_default(value, |v| v * PA_TO_FT)
}

pub fn from_w_to_hp(value: Option<f64>) -> f64 {
    or_default(value, |v| v * W_TO_HP)
}

pub fn from_m_to_inches(value: Option<f64>) -> f64 {
    or_default(value, |v| v * M_TO_INCHES)
}

pub fn from_hz_to_rpm(value: Option<f64>) -> f64 {
    or_default(value, |v| v * HZ_TO_RPM)
}
