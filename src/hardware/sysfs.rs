// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Production adapter: sysfs attribute files and the `amixer` command.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::{Channel, HardwareAdapter};

/// Device files touched by [`SysfsHardware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsPaths {
    pub backlight: PathBuf,
    pub color_temperature: PathBuf,
    pub contrast: PathBuf,
    pub saturation: PathBuf,
    pub exposure: PathBuf,
    /// GPIO value, active low.
    pub jack: PathBuf,
    /// DRM connector status.
    pub hdmi: PathBuf,
}

impl Default for SysfsPaths {
    fn default() -> Self {
        Self {
            backlight: "/sys/class/backlight/backlight/brightness".into(),
            color_temperature: "/sys/class/disp/disp/attr/color_temperature".into(),
            contrast: "/sys/class/disp/disp/attr/enhance_contrast".into(),
            saturation: "/sys/class/disp/disp/attr/enhance_saturation".into(),
            exposure: "/sys/class/disp/disp/attr/enhance_bright".into(),
            jack: "/sys/class/gpio/gpio150/value".into(),
            hdmi: "/sys/class/drm/card0-HDMI-A-1/status".into(),
        }
    }
}

impl SysfsPaths {
    /// Same layout rooted somewhere other than `/`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let rebase = |p: PathBuf| root.join(p.strip_prefix("/").unwrap_or(&p));
        let d = Self::default();
        Self {
            backlight: rebase(d.backlight),
            color_temperature: rebase(d.color_temperature),
            contrast: rebase(d.contrast),
            saturation: rebase(d.saturation),
            exposure: rebase(d.exposure),
            jack: rebase(d.jack),
            hdmi: rebase(d.hdmi),
        }
    }

    fn channel(&self, channel: Channel) -> &Path {
        match channel {
            Channel::Backlight => &self.backlight,
            Channel::ColorTemperature => &self.color_temperature,
            Channel::Contrast => &self.contrast,
            Channel::Saturation => &self.saturation,
            Channel::Exposure => &self.exposure,
        }
    }
}

/// Writes sysfs attributes and drives the ALSA mixer through `amixer`.
#[derive(Debug, Clone)]
pub struct SysfsHardware {
    paths: SysfsPaths,
    mixer: String,
}

impl Default for SysfsHardware {
    fn default() -> Self {
        Self::new(SysfsPaths::default())
    }
}

impl SysfsHardware {
    pub fn new(paths: SysfsPaths) -> Self {
        Self {
            paths,
            mixer: "amixer".to_owned(),
        }
    }

    /// Use a different mixer executable (must accept `amixer sset` syntax).
    pub fn with_mixer(mut self, mixer: impl Into<String>) -> Self {
        self.mixer = mixer.into();
        self
    }

    pub fn paths(&self) -> &SysfsPaths {
        &self.paths
    }

    fn sset(&self, control: &str, value: &str) -> io::Result<()> {
        trace!(mixer = %self.mixer, control, value, "amixer sset");
        let status = Command::new(&self.mixer)
            .args(["sset", control, value])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} sset '{control}' '{value}' failed: {status}", self.mixer),
            ));
        }
        Ok(())
    }

    fn playback_path(&self, value: &str) -> io::Result<()> {
        self.sset("Playback Path", value)
    }
}

impl HardwareAdapter for SysfsHardware {
    fn apply_raw(&self, channel: Channel, raw: i32) -> io::Result<()> {
        let path = self.paths.channel(channel);
        debug!(%channel, raw, path = %path.display(), "write raw value");
        fs::write(path, raw.to_string())
    }

    fn apply_raw_volume(&self, percent: i32, jack_present: bool) -> io::Result<()> {
        debug!(percent, jack_present, "set raw volume");
        // Nudge first so the final write is always a change.
        self.sset("SPK", "1%")?;
        if jack_present {
            self.playback_path("HP")?;
        } else if percent == 0 {
            // Muting the headphone path instead produces white noise.
            self.playback_path("OFF")?;
        } else {
            self.playback_path("SPK")?;
        }
        self.sset("SPK", &format!("{percent}%"))
    }

    fn set_playback_path(&self, jack_present: bool) -> io::Result<()> {
        self.playback_path(if jack_present { "HP" } else { "SPK" })
    }

    fn read_jack_line(&self) -> bool {
        match fs::read_to_string(&self.paths.jack) {
            Ok(s) => s.trim().parse::<i32>().map(|v| v == 0).unwrap_or(false),
            Err(e) => {
                debug!(path = %self.paths.jack.display(), error = %e, "jack line unreadable");
                false
            }
        }
    }

    fn read_hdmi_status(&self) -> bool {
        match fs::read_to_string(&self.paths.hdmi) {
            Ok(s) => s.trim_end() == "connected",
            Err(e) => {
                debug!(path = %self.paths.hdmi.display(), error = %e, "hdmi status unreadable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted() -> (tempfile::TempDir, SysfsHardware) {
        let dir = tempfile::tempdir().unwrap();
        let paths = SysfsPaths::under(dir.path());
        for p in [
            &paths.backlight,
            &paths.color_temperature,
            &paths.contrast,
            &paths.saturation,
            &paths.exposure,
            &paths.jack,
            &paths.hdmi,
        ] {
            fs::create_dir_all(p.parent().unwrap()).unwrap();
        }
        (dir, SysfsHardware::new(paths))
    }

    #[test]
    fn paths_under_root() {
        let paths = SysfsPaths::under("/tmp/fake");
        assert_eq!(
            paths.backlight,
            PathBuf::from("/tmp/fake/sys/class/backlight/backlight/brightness")
        );
    }

    #[test]
    fn apply_raw_writes_decimal() {
        let (_dir, hw) = rooted();
        hw.apply_raw(Channel::Contrast, 70).unwrap();
        hw.apply_raw(Channel::ColorTemperature, -150).unwrap();
        assert_eq!(fs::read_to_string(&hw.paths().contrast).unwrap(), "70");
        assert_eq!(fs::read_to_string(&hw.paths().color_temperature).unwrap(), "-150");
    }

    #[test]
    fn apply_raw_missing_device_is_an_error() {
        let hw = SysfsHardware::new(SysfsPaths::under("/nonexistent/msettings"));
        assert!(hw.apply_raw(Channel::Backlight, 8).is_err());
    }

    #[test]
    fn jack_line_is_active_low() {
        let (_dir, hw) = rooted();
        assert!(!hw.read_jack_line(), "missing file reads as absent");
        fs::write(&hw.paths().jack, "0\n").unwrap();
        assert!(hw.read_jack_line());
        fs::write(&hw.paths().jack, "1\n").unwrap();
        assert!(!hw.read_jack_line());
    }

    #[test]
    fn hdmi_status_exact_match() {
        let (_dir, hw) = rooted();
        assert!(!hw.read_hdmi_status());
        fs::write(&hw.paths().hdmi, "connected\n").unwrap();
        assert!(hw.read_hdmi_status());
        fs::write(&hw.paths().hdmi, "disconnected\n").unwrap();
        assert!(!hw.read_hdmi_status());
    }

    #[test]
    fn missing_mixer_is_an_error() {
        let (_dir, hw) = rooted();
        let hw = hw.with_mixer("/nonexistent/amixer");
        assert!(hw.apply_raw_volume(40, false).is_err());
        assert!(hw.set_playback_path(true).is_err());
    }
}
