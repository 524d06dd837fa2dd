// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Hardware collaborator: the only place raw values leave the process.

use std::fmt;
use std::io;

mod recording;
mod sysfs;

pub use recording::{HardwareCall, RecordingHardware};
pub use sysfs::{SysfsHardware, SysfsPaths};

/// Display output driven by a single raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Backlight,
    ColorTemperature,
    Contrast,
    Saturation,
    Exposure,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Backlight => "backlight",
            Self::ColorTemperature => "color_temperature",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Exposure => "exposure",
        })
    }
}

/// Side-effecting access to the device.
///
/// Write failures are reported but the settings layer absorbs them: the
/// logical record is updated either way. Line reads are infallible; an
/// unreadable line reads as "not present".
pub trait HardwareAdapter {
    /// Write a scaled value to one display channel.
    fn apply_raw(&self, channel: Channel, raw: i32) -> io::Result<()>;

    /// Set the mixer to `percent` (0..=100) and route audio: headphone path
    /// when `jack_present`, speaker off at 0, speaker path otherwise.
    fn apply_raw_volume(&self, percent: i32, jack_present: bool) -> io::Result<()>;

    /// Select the mixer playback path without touching the level.
    fn set_playback_path(&self, jack_present: bool) -> io::Result<()>;

    /// `true` when headphones are inserted.
    fn read_jack_line(&self) -> bool;

    /// `true` when an external display is connected.
    fn read_hdmi_status(&self) -> bool;
}
