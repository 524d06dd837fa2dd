// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Per-process settings session.
//
// Lifecycle: Uninitialized -> Mapped -> Active -> Closed. `open` runs the
// first two transitions and only ever hands out an Active session; `close`
// consumes it, so no accessor can run against an unmapped record.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::accessors::{Display, Lines, Muted, Volume};
use crate::config::SettingsConfig;
use crate::error::Result;
use crate::hardware::HardwareAdapter;
use crate::record::SettingsRecord;
use crate::scaling::BrightnessCurve;
use crate::store::{Role, SettingsStore};

pub struct SettingsSession<H: HardwareAdapter> {
    store: SettingsStore,
    role: Role,
    hardware: H,
    curve: BrightnessCurve,
}

impl<H: HardwareAdapter> SettingsSession<H> {
    /// Map the shared record and sync the hardware to it.
    ///
    /// Fails only if the shared region cannot be created or opened.
    pub fn open(config: &SettingsConfig, hardware: H) -> Result<Self> {
        let (store, role) = SettingsStore::open(config)?;
        let session = Self {
            store,
            role,
            hardware,
            curve: config.brightness_curve,
        };
        session.sync_hardware();
        Ok(session)
    }

    /// Mapped -> Active, identical for host and client.
    fn sync_hardware(&self) {
        let jack = self.hardware.read_jack_line();
        let hdmi = self.hardware.read_hdmi_status();
        let rec = self.store.snapshot();
        info!(
            role = ?self.role,
            brightness = rec.brightness,
            hdmi,
            speaker = rec.speaker_volume,
            jack,
            "syncing hardware"
        );

        let lines = self.lines();
        lines.set_jack(jack);
        lines.set_hdmi(hdmi);

        let jack = lines.jack();
        if let Err(e) = self.hardware.set_playback_path(jack) {
            tracing::warn!(error = %e, "cannot select playback path");
        }

        self.set_volume(self.volume());
        self.set_brightness(self.brightness());
    }

    /// Active -> Closed. A host also removes the shared region.
    pub fn close(self) {
        drop(self);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Copy of the whole shared record.
    pub fn snapshot(&self) -> SettingsRecord {
        self.store.snapshot()
    }

    fn volume_control(&self) -> Volume<'_, H> {
        Volume::new(&self.store, &self.hardware)
    }

    fn display(&self) -> Display<'_, H> {
        Display::new(&self.store, &self.hardware, self.curve)
    }

    fn lines(&self) -> Lines<'_, H> {
        Lines::new(&self.store, self.volume_control(), self.display())
    }

    fn muted(&self) -> Muted<'_> {
        Muted::new(&self.store)
    }

    // ---- display ----

    pub fn brightness(&self) -> i32 {
        self.display().brightness()
    }

    /// 0..=10. Ignored while HDMI is active.
    pub fn set_brightness(&self, value: i32) {
        self.display().set_brightness(value);
    }

    pub fn color_temperature(&self) -> i32 {
        self.display().color_temperature()
    }

    /// 0..=40, 20 is neutral.
    pub fn set_color_temperature(&self, value: i32) {
        self.display().set_color_temperature(value);
    }

    pub fn contrast(&self) -> i32 {
        self.display().contrast()
    }

    /// -4..=5.
    pub fn set_contrast(&self, value: i32) {
        self.display().set_contrast(value);
    }

    pub fn saturation(&self) -> i32 {
        self.display().saturation()
    }

    /// -5..=5.
    pub fn set_saturation(&self, value: i32) {
        self.display().set_saturation(value);
    }

    pub fn exposure(&self) -> i32 {
        self.display().exposure()
    }

    /// -4..=5.
    pub fn set_exposure(&self, value: i32) {
        self.display().set_exposure(value);
    }

    // ---- audio ----

    /// Level of the live output: headphones if the jack is in, else speaker.
    pub fn volume(&self) -> i32 {
        self.volume_control().get()
    }

    /// 0..=20. Ignored while HDMI is active.
    pub fn set_volume(&self, value: i32) {
        self.volume_control().set(value);
    }

    pub fn headphone_volume(&self) -> i32 {
        self.store.read(|r| r.headphone_volume)
    }

    pub fn speaker_volume(&self) -> i32 {
        self.store.read(|r| r.speaker_volume)
    }

    /// Always `false`; mute is not implemented at this layer.
    pub fn mute(&self) -> bool {
        false
    }

    pub fn set_mute(&self, _value: bool) {}

    // ---- lines ----

    pub fn jack(&self) -> bool {
        self.lines().jack()
    }

    pub fn set_jack(&self, present: bool) {
        self.lines().set_jack(present);
    }

    pub fn hdmi(&self) -> bool {
        self.lines().hdmi()
    }

    pub fn set_hdmi(&self, active: bool) {
        self.lines().set_hdmi(active);
    }

    // ---- muted profile ----

    pub fn muted_brightness(&self) -> i32 {
        self.muted().brightness()
    }

    pub fn set_muted_brightness(&self, value: i32) {
        self.muted().set_brightness(value);
    }

    pub fn muted_color_temperature(&self) -> i32 {
        self.muted().color_temperature()
    }

    pub fn set_muted_color_temperature(&self, value: i32) {
        self.muted().set_color_temperature(value);
    }

    pub fn muted_contrast(&self) -> i32 {
        self.muted().contrast()
    }

    pub fn set_muted_contrast(&self, value: i32) {
        self.muted().set_contrast(value);
    }

    pub fn muted_saturation(&self) -> i32 {
        self.muted().saturation()
    }

    pub fn set_muted_saturation(&self, value: i32) {
        self.muted().set_saturation(value);
    }

    pub fn muted_exposure(&self) -> i32 {
        self.muted().exposure()
    }

    pub fn set_muted_exposure(&self, value: i32) {
        self.muted().set_exposure(value);
    }

    // ---- by name ----

    /// Read any setting; flags read as 0/1.
    pub fn get(&self, setting: Setting) -> i32 {
        match setting {
            Setting::Brightness => self.brightness(),
            Setting::ColorTemperature => self.color_temperature(),
            Setting::Contrast => self.contrast(),
            Setting::Saturation => self.saturation(),
            Setting::Exposure => self.exposure(),
            Setting::Volume => self.volume(),
            Setting::Mute => i32::from(self.mute()),
            Setting::Jack => i32::from(self.jack()),
            Setting::Hdmi => i32::from(self.hdmi()),
            Setting::MutedBrightness => self.muted_brightness(),
            Setting::MutedColorTemperature => self.muted_color_temperature(),
            Setting::MutedContrast => self.muted_contrast(),
            Setting::MutedSaturation => self.muted_saturation(),
            Setting::MutedExposure => self.muted_exposure(),
        }
    }

    /// Write any setting; flags treat non-zero as `true`.
    pub fn set(&self, setting: Setting, value: i32) {
        match setting {
            Setting::Brightness => self.set_brightness(value),
            Setting::ColorTemperature => self.set_color_temperature(value),
            Setting::Contrast => self.set_contrast(value),
            Setting::Saturation => self.set_saturation(value),
            Setting::Exposure => self.set_exposure(value),
            Setting::Volume => self.set_volume(value),
            Setting::Mute => self.set_mute(value != 0),
            Setting::Jack => self.set_jack(value != 0),
            Setting::Hdmi => self.set_hdmi(value != 0),
            Setting::MutedBrightness => self.set_muted_brightness(value),
            Setting::MutedColorTemperature => self.set_muted_color_temperature(value),
            Setting::MutedContrast => self.set_muted_contrast(value),
            Setting::MutedSaturation => self.set_muted_saturation(value),
            Setting::MutedExposure => self.set_muted_exposure(value),
        }
    }
}

impl<H: HardwareAdapter> Drop for SettingsSession<H> {
    fn drop(&mut self) {
        info!(role = ?self.role, "closing settings session");
        self.store.release_name(self.role);
    }
}

/// Every setting reachable through [`SettingsSession::get`] / [`SettingsSession::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Brightness,
    ColorTemperature,
    Contrast,
    Saturation,
    Exposure,
    Volume,
    Mute,
    Jack,
    Hdmi,
    MutedBrightness,
    MutedColorTemperature,
    MutedContrast,
    MutedSaturation,
    MutedExposure,
}

impl Setting {
    pub const ALL: [Setting; 14] = [
        Setting::Brightness,
        Setting::ColorTemperature,
        Setting::Contrast,
        Setting::Saturation,
        Setting::Exposure,
        Setting::Volume,
        Setting::Mute,
        Setting::Jack,
        Setting::Hdmi,
        Setting::MutedBrightness,
        Setting::MutedColorTemperature,
        Setting::MutedContrast,
        Setting::MutedSaturation,
        Setting::MutedExposure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Setting::Brightness => "brightness",
            Setting::ColorTemperature => "colortemp",
            Setting::Contrast => "contrast",
            Setting::Saturation => "saturation",
            Setting::Exposure => "exposure",
            Setting::Volume => "volume",
            Setting::Mute => "mute",
            Setting::Jack => "jack",
            Setting::Hdmi => "hdmi",
            Setting::MutedBrightness => "muted-brightness",
            Setting::MutedColorTemperature => "muted-colortemp",
            Setting::MutedContrast => "muted-contrast",
            Setting::MutedSaturation => "muted-saturation",
            Setting::MutedExposure => "muted-exposure",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == key)
            .ok_or_else(|| {
                let names: Vec<&str> = Setting::ALL.iter().map(|s| s.name()).collect();
                format!("unknown setting '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
