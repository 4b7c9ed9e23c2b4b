//! Property checks for the color helpers that span more than one function.

use toolbelt_core::color::{get_opacity_hex_value, hex_to_rgb, rgb_to_hex, RgbColor};

// ---------------------------------------------------------------------------
// Test: hex round trip
// ---------------------------------------------------------------------------

/// Every channel value survives `rgb_to_hex` → `hex_to_rgb` in every
/// position.
#[test]
fn hex_round_trip_every_channel_value() {
    for v in 0..=255u8 {
        for (r, g, b) in [(v, 0, 0), (0, v, 0), (0, 0, v), (v, v, v), (v, 255 - v, v / 2)] {
            let hex = rgb_to_hex(r.into(), g.into(), b.into()).expect("channels are in range");
            assert_eq!(
                hex_to_rgb(&hex).expect("rendered hex parses"),
                RgbColor { r, g, b },
                "hex={hex}"
            );
        }
    }
}

/// A coarse grid over the full cube, with the `#` prefix.
#[test]
fn hex_round_trip_grid_with_hash() {
    for r in (0..=255u8).step_by(17) {
        for g in (0..=255u8).step_by(51) {
            for b in (0..=255u8).step_by(85) {
                let hex = format!("#{}", rgb_to_hex(r.into(), g.into(), b.into()).unwrap());
                assert_eq!(hex_to_rgb(&hex).unwrap(), RgbColor { r, g, b });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test: opacity monotonicity
// ---------------------------------------------------------------------------

/// The opacity byte never decreases as opacity grows across `[0, 1]`.
#[test]
fn opacity_hex_is_monotonic() {
    let mut previous = 0u8;
    for step in 0..=1000 {
        let opacity = f64::from(step) / 1000.0;
        let hex = get_opacity_hex_value(opacity).expect("opacity is in range");
        let byte = u8::from_str_radix(&hex, 16).expect("two hex digits");
        assert!(byte >= previous, "opacity={opacity} gave {hex}");
        previous = byte;
    }
    assert_eq!(previous, 255);
}
