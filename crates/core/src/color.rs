//! Color conversion helpers: RGB and hex, alpha compositing, luma-based
//! contrast, and the red → yellow → green percentage gradient.
//!
//! Luma here is the ITU-R BT.601 weighted sum `0.299R + 0.587G + 0.114B`,
//! not perceptual luminance.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largest value an 8-bit channel may hold.
pub const MAX_CHANNEL: u32 = 255;

/// Luma above which a color counts as light.
pub const LIGHT_LUMA_THRESHOLD: f64 = 0.5;

/// Text color returned for light backgrounds.
pub const DARK_TEXT: &str = "#000000";

/// Text color returned for dark (or unparseable) backgrounds.
pub const LIGHT_TEXT: &str = "#ffffff";

/// Strict 6-digit hex color with an optional leading `#`.
static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An RGB color with an alpha component expected in `[0, 1]`.
///
/// Alpha is checked where it is consumed (see [`get_opacity_hex_value`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// RGB channels scaled into `[0, 1]`, the form graphics libraries expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl From<RgbaColor> for RgbColor {
    fn from(color: RgbaColor) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

// ---------------------------------------------------------------------------
// Hex conversion
// ---------------------------------------------------------------------------

fn pack_hex(r: u32, g: u32, b: u32) -> String {
    format!("{:06x}", (r << 16) | (g << 8) | b)
}

/// Render three channels as a 6-digit lowercase hex string without `#`.
///
/// Fails when any channel exceeds 255.
///
/// ```
/// use toolbelt_core::color::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex(255, 0, 0).unwrap(), "ff0000");
/// assert_eq!(rgb_to_hex(1, 2, 3).unwrap(), "010203");
/// assert!(rgb_to_hex(256, 0, 0).is_err());
/// ```
pub fn rgb_to_hex(r: u32, g: u32, b: u32) -> Result<String, CoreError> {
    if r > MAX_CHANNEL || g > MAX_CHANNEL || b > MAX_CHANNEL {
        return Err(CoreError::InvalidInput(format!(
            "color component must be <= {MAX_CHANNEL}, got ({r}, {g}, {b})"
        )));
    }
    Ok(pack_hex(r, g, b))
}

/// Parse the leading hex digits of a channel group.
///
/// Leading whitespace and one `+`/`-` sign are skipped first. `None` when no
/// hex digit follows, or when the value is negative (`-0` is still `0`).
fn parse_hex_prefix(group: &str) -> Option<u8> {
    let trimmed = group.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
    let value = u8::from_str_radix(&digits, 16).ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Split a hex string into three 2-character channel groups.
///
/// The first `#` is stripped. Length and character set are not validated:
/// each group contributes whatever hex digits it starts with, so `"0g"`
/// reads as `0` and `" f"` reads as `15`. A group without any leading hex
/// digit is an error.
pub fn hex_to_rgb(hex: &str) -> Result<RgbColor, CoreError> {
    let clean: Vec<char> = hex.replacen('#', "", 1).chars().collect();

    let channel = |start: usize| -> Result<u8, CoreError> {
        let group: String = clean.iter().skip(start).take(2).collect();
        parse_hex_prefix(&group).ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "'{hex}' has no hex digits for the channel at offset {start}"
            ))
        })
    };

    Ok(RgbColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// `#`-prefixed hex of the RGB part; alpha is ignored.
pub fn rgba_to_hex(color: &RgbaColor) -> String {
    format!(
        "#{}",
        pack_hex(u32::from(color.r), u32::from(color.g), u32::from(color.b))
    )
}

/// Two-digit hex byte for an opacity in `[0, 1]`: `round(opacity * 255)`.
pub fn get_opacity_hex_value(opacity: f64) -> Result<String, CoreError> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(CoreError::InvalidInput(format!(
            "opacity must be within [0, 1], got {opacity}"
        )));
    }
    let byte = (opacity * 255.0).round() as u8;
    Ok(format!("{byte:02x}"))
}

/// `#rrggbbaa` for a color whose alpha lies in `[0, 1]`.
pub fn rgba_to_hex_with_alpha(color: &RgbaColor) -> Result<String, CoreError> {
    Ok(rgba_to_hex(color) + &get_opacity_hex_value(color.a)?)
}

// ---------------------------------------------------------------------------
// CSS strings
// ---------------------------------------------------------------------------

pub fn rgb_to_string(color: &RgbColor) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

/// Alpha is rendered as given, with no fixed number of decimals.
pub fn rgba_to_string(color: &RgbaColor) -> String {
    format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, color.a)
}

// ---------------------------------------------------------------------------
// Luma and contrast
// ---------------------------------------------------------------------------

fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Luma of 0-255 channels, normalized to `[0, 1]`.
pub fn get_luminance(r: f64, g: f64, b: f64) -> f64 {
    luma(r, g, b) / 255.0
}

/// Black text on light backgrounds, white text otherwise.
///
/// Unparseable hex falls on the white side.
pub fn get_contrast_text_color(hex: &str) -> &'static str {
    match hex_to_rgb(hex) {
        Ok(c)
            if get_luminance(f64::from(c.r), f64::from(c.g), f64::from(c.b))
                > LIGHT_LUMA_THRESHOLD =>
        {
            DARK_TEXT
        }
        _ => LIGHT_TEXT,
    }
}

/// Strictly parse `#rrggbb` / `rrggbb` (any case) into `[0, 1]` channels.
///
/// Anything else yields black rather than an error.
pub fn hex_to_normalized_rgb(hex: &str) -> NormalizedRgb {
    let Some(caps) = HEX_COLOR_RE.captures(hex) else {
        return NormalizedRgb::default();
    };

    let channel = |idx: usize| {
        caps.get(idx)
            .and_then(|m| u8::from_str_radix(m.as_str(), 16).ok())
            .map_or(0.0, |v| f64::from(v) / 255.0)
    };

    NormalizedRgb {
        r: channel(1),
        g: channel(2),
        b: channel(3),
    }
}

pub fn is_light_color(hex: &str) -> bool {
    let rgb = hex_to_normalized_rgb(hex);
    luma(rgb.r, rgb.g, rgb.b) > LIGHT_LUMA_THRESHOLD
}

// ---------------------------------------------------------------------------
// Percentage gradient
// ---------------------------------------------------------------------------

struct GradientStop {
    pct: f64,
    r: f64,
    g: f64,
    b: f64,
}

/// Red at 0, yellow at 0.5, green at 1.
const GRADIENT_STOPS: [GradientStop; 3] = [
    GradientStop { pct: 0.0, r: 255.0, g: 0.0, b: 0.0 },
    GradientStop { pct: 0.5, r: 255.0, g: 255.0, b: 0.0 },
    GradientStop { pct: 1.0, r: 0.0, g: 255.0, b: 0.0 },
];

/// Map a fraction to a `rgb(r,g,b)` string on the red → yellow → green
/// gradient, flooring each interpolated channel.
///
/// Values outside `[0, 1]` extrapolate the first or last segment, so the
/// channels may leave the 0-255 range.
///
/// ```
/// use toolbelt_core::color::get_color_for_percentage;
///
/// assert_eq!(get_color_for_percentage(0.0), "rgb(255,0,0)");
/// assert_eq!(get_color_for_percentage(0.25), "rgb(255,127,0)");
/// assert_eq!(get_color_for_percentage(1.0), "rgb(0,255,0)");
/// ```
pub fn get_color_for_percentage(pct: f64) -> String {
    let last = GRADIENT_STOPS.len() - 1;
    let upper_idx = (1..last)
        .find(|&i| pct < GRADIENT_STOPS[i].pct)
        .unwrap_or(last);

    let lower = &GRADIENT_STOPS[upper_idx - 1];
    let upper = &GRADIENT_STOPS[upper_idx];

    let range_pct = (pct - lower.pct) / (upper.pct - lower.pct);
    let pct_lower = 1.0 - range_pct;
    let pct_upper = range_pct;
    let mix = |lo: f64, hi: f64| (lo * pct_lower + hi * pct_upper).floor() as i64;

    format!(
        "rgb({},{},{})",
        mix(lower.r, upper.r),
        mix(lower.g, upper.g),
        mix(lower.b, upper.b)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
