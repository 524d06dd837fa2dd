// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Logical level -> raw hardware value.
//
// Every function is total over its declared domain (see `record`); callers
// clamp first. Out-of-domain input is a contract violation and yields an
// unspecified in-range value.

use crate::record::{
    clamp_to, BRIGHTNESS_RANGE, COLOR_TEMPERATURE_RANGE, CONTRAST_RANGE, EXPOSURE_RANGE,
    SATURATION_RANGE, VOLUME_RANGE,
};

/// Backlight response of the panel fitted to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessCurve {
    #[default]
    Standard,
    /// Brighter panel variant; starts lower so level 0 is still dim.
    HighLuminance,
}

const BRIGHTNESS_STANDARD: [i32; 11] = [8, 12, 16, 24, 32, 48, 64, 96, 128, 192, 255];
const BRIGHTNESS_HIGH_LUMINANCE: [i32; 11] = [1, 8, 16, 32, 48, 72, 96, 128, 160, 192, 255];

/// Backlight value, 1..=255.
pub fn brightness(curve: BrightnessCurve, level: i32) -> i32 {
    let idx = clamp_to(&BRIGHTNESS_RANGE, level) as usize;
    match curve {
        BrightnessCurve::Standard => BRIGHTNESS_STANDARD[idx],
        BrightnessCurve::HighLuminance => BRIGHTNESS_HIGH_LUMINANCE[idx],
    }
}

/// Colour temperature offset, -200..=200 in steps of 10; level 20 is neutral.
pub fn color_temperature(level: i32) -> i32 {
    -200 + 10 * clamp_to(&COLOR_TEMPERATURE_RANGE, level)
}

/// Contrast enhancement percentage, 10..=100.
pub fn contrast(level: i32) -> i32 {
    50 + 10 * clamp_to(&CONTRAST_RANGE, level)
}

/// Saturation enhancement percentage, 0..=100.
pub fn saturation(level: i32) -> i32 {
    50 + 10 * clamp_to(&SATURATION_RANGE, level)
}

/// Exposure enhancement percentage, 10..=100.
pub fn exposure(level: i32) -> i32 {
    50 + 10 * clamp_to(&EXPOSURE_RANGE, level)
}

/// Mixer percentage, 0..=100. Linear, no table.
pub fn volume(level: i32) -> i32 {
    clamp_to(&VOLUME_RANGE, level) * 5
}

/// Raw mixer value used while HDMI owns the audio output.
pub const MAX_RAW_VOLUME: i32 = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::RangeInclusive;

    fn assert_monotonic(domain: RangeInclusive<i32>, raw: impl Fn(i32) -> i32, bounds: (i32, i32)) {
        let mut prev = i32::MIN;
        for level in domain {
            let r = raw(level);
            assert!(r >= bounds.0 && r <= bounds.1, "level {level} -> {r} out of {bounds:?}");
            assert!(r >= prev, "level {level} -> {r} below previous {prev}");
            prev = r;
        }
    }

    #[test]
    fn brightness_curves_are_monotonic() {
        for curve in [BrightnessCurve::Standard, BrightnessCurve::HighLuminance] {
            assert_monotonic(BRIGHTNESS_RANGE, |l| brightness(curve, l), (1, 255));
            assert_eq!(brightness(curve, 10), 255);
        }
    }

    #[test]
    fn curves_differ_at_the_low_end() {
        assert_eq!(brightness(BrightnessCurve::Standard, 0), 8);
        assert_eq!(brightness(BrightnessCurve::HighLuminance, 0), 1);
        assert_eq!(brightness(BrightnessCurve::HighLuminance, 5), 72);
    }

    #[test]
    fn enhancement_tables() {
        assert_monotonic(CONTRAST_RANGE, contrast, (10, 100));
        assert_monotonic(SATURATION_RANGE, saturation, (0, 100));
        assert_monotonic(EXPOSURE_RANGE, exposure, (10, 100));
        assert_eq!(contrast(0), 50);
        assert_eq!(saturation(-5), 0);
        assert_eq!(exposure(-4), 10);
    }

    #[test]
    fn color_temperature_is_centred() {
        assert_eq!(color_temperature(0), -200);
        assert_eq!(color_temperature(20), 0);
        assert_eq!(color_temperature(40), 200);
    }

    #[test]
    fn volume_is_linear() {
        assert_eq!(volume(0), 0);
        assert_eq!(volume(8), 40);
        assert_eq!(volume(20), MAX_RAW_VOLUME);
    }
}
