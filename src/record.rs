// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// The settings record: a fixed-size value that lives in shared memory and
// is mirrored byte-for-byte to the persistence file.

use std::ops::RangeInclusive;

/// Format tag written into every record.
pub const SETTINGS_VERSION: i32 = 7;

/// Muted-profile sentinel: "leave this channel as it is while muted".
pub const NO_CHANGE: i32 = -69;

pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = 0..=10;
pub const COLOR_TEMPERATURE_RANGE: RangeInclusive<i32> = 0..=40;
pub const VOLUME_RANGE: RangeInclusive<i32> = 0..=20;
/// -5 is never offered: raw 0 may blank the panel.
pub const CONTRAST_RANGE: RangeInclusive<i32> = -4..=5;
pub const SATURATION_RANGE: RangeInclusive<i32> = -5..=5;
pub const EXPOSURE_RANGE: RangeInclusive<i32> = -4..=5;

pub const DEFAULT_BRIGHTNESS: i32 = 2;
pub const DEFAULT_COLOR_TEMPERATURE: i32 = 20;
pub const DEFAULT_HEADPHONE_VOLUME: i32 = 4;
pub const DEFAULT_SPEAKER_VOLUME: i32 = 8;
pub const DEFAULT_CONTRAST: i32 = 0;
pub const DEFAULT_SATURATION: i32 = 0;
pub const DEFAULT_EXPOSURE: i32 = 0;

/// Shared settings record, format version 7.
///
/// The field order and width match the file already present on devices, so
/// it must not be reordered. Booleans are stored as `0`/`1` words; every bit
/// pattern is a valid record, which is what makes loading raw bytes sound.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRecord {
    pub version: i32,
    pub brightness: i32,
    pub color_temperature: i32,
    pub headphone_volume: i32,
    pub speaker_volume: i32,
    /// Unused; always 0.
    pub mute: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub exposure: i32,
    pub muted_brightness: i32,
    pub muted_color_temperature: i32,
    pub muted_contrast: i32,
    pub muted_saturation: i32,
    /// Transient, but every process needs to see it.
    pub hdmi: i32,
    pub muted_exposure: i32,
    pub reserved: [i32; 2],
    /// Transient, but every process needs to see it.
    pub jack: i32,
}

/// Size of the shared region and of the persistence file.
pub const RECORD_SIZE: usize = std::mem::size_of::<SettingsRecord>();

const _: () = assert!(RECORD_SIZE == 18 * 4);

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            brightness: DEFAULT_BRIGHTNESS,
            color_temperature: DEFAULT_COLOR_TEMPERATURE,
            headphone_volume: DEFAULT_HEADPHONE_VOLUME,
            speaker_volume: DEFAULT_SPEAKER_VOLUME,
            mute: 0,
            contrast: DEFAULT_CONTRAST,
            saturation: DEFAULT_SATURATION,
            exposure: DEFAULT_EXPOSURE,
            muted_brightness: NO_CHANGE,
            muted_color_temperature: NO_CHANGE,
            muted_contrast: NO_CHANGE,
            muted_saturation: NO_CHANGE,
            hdmi: 0,
            muted_exposure: NO_CHANGE,
            reserved: [0; 2],
            jack: 0,
        }
    }
}

impl SettingsRecord {
    /// Reinterpret a persisted image. Anything but exactly [`RECORD_SIZE`]
    /// bytes is rejected rather than partially loaded.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != RECORD_SIZE {
            return None;
        }
        // Safety: length checked above; all-i32 repr(C) has no invalid bit patterns.
        Some(unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const Self) })
    }

    /// Raw in-memory bytes, native endian.
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: repr(C) with no padding (asserted by the size check above).
        unsafe { std::slice::from_raw_parts(self as *const Self as *const u8, RECORD_SIZE) }
    }

    pub fn jack_present(&self) -> bool {
        self.jack != 0
    }

    pub fn hdmi_active(&self) -> bool {
        self.hdmi != 0
    }

    /// Logical volume for whichever output is live.
    pub fn effective_volume(&self) -> i32 {
        if self.jack_present() {
            self.headphone_volume
        } else {
            self.speaker_volume
        }
    }
}

/// Clamp `value` into `range`.
pub fn clamp_to(range: &RangeInclusive<i32>, value: i32) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// Clamp a muted-profile value; [`NO_CHANGE`] passes through.
pub fn clamp_muted(range: &RangeInclusive<i32>, value: i32) -> i32 {
    if value == NO_CHANGE {
        value
    } else {
        clamp_to(range, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let rec = SettingsRecord::default();
        assert_eq!(rec.version, SETTINGS_VERSION);
        assert!(BRIGHTNESS_RANGE.contains(&rec.brightness));
        assert!(COLOR_TEMPERATURE_RANGE.contains(&rec.color_temperature));
        assert!(VOLUME_RANGE.contains(&rec.headphone_volume));
        assert!(VOLUME_RANGE.contains(&rec.speaker_volume));
        assert!(CONTRAST_RANGE.contains(&rec.contrast));
        assert!(SATURATION_RANGE.contains(&rec.saturation));
        assert!(EXPOSURE_RANGE.contains(&rec.exposure));
        assert_eq!(rec.muted_exposure, NO_CHANGE);
        assert!(!rec.jack_present());
        assert!(!rec.hdmi_active());
    }

    #[test]
    fn field_offsets_match_device_layout() {
        let rec = SettingsRecord {
            hdmi: 1,
            jack: 1,
            ..SettingsRecord::default()
        };
        let bytes = rec.as_bytes();
        let word = |i: usize| i32::from_ne_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        assert_eq!(word(0), SETTINGS_VERSION);
        assert_eq!(word(1), DEFAULT_BRIGHTNESS);
        assert_eq!(word(4), DEFAULT_SPEAKER_VOLUME);
        assert_eq!(word(13), 1);
        assert_eq!(word(14), NO_CHANGE);
        assert_eq!(word(17), 1);
    }

    #[test]
    fn from_bytes_rejects_wrong_size() {
        let rec = SettingsRecord::default();
        assert!(SettingsRecord::from_bytes(&rec.as_bytes()[..RECORD_SIZE - 1]).is_none());
        let mut longer = rec.as_bytes().to_vec();
        longer.push(0);
        assert!(SettingsRecord::from_bytes(&longer).is_none());
        assert_eq!(SettingsRecord::from_bytes(rec.as_bytes()), Some(rec));
    }

    #[test]
    fn effective_volume_follows_jack() {
        let mut rec = SettingsRecord {
            headphone_volume: 3,
            speaker_volume: 11,
            ..SettingsRecord::default()
        };
        assert_eq!(rec.effective_volume(), 11);
        rec.jack = 1;
        assert_eq!(rec.effective_volume(), 3);
    }

    #[test]
    fn clamp_muted_keeps_sentinel() {
        assert_eq!(clamp_muted(&CONTRAST_RANGE, NO_CHANGE), NO_CHANGE);
        assert_eq!(clamp_muted(&CONTRAST_RANGE, -5), -4);
        assert_eq!(clamp_muted(&CONTRAST_RANGE, 9), 5);
    }
}
