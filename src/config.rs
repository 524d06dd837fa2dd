// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Startup configuration, normally taken from the device environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};
use crate::scaling::BrightnessCurve;
use crate::shm_name::DEFAULT_SHM_NAME;

/// Directory holding per-user data; the record is persisted inside it.
pub const USERDATA_PATH_VAR: &str = "USERDATA_PATH";
/// Overrides [`DEFAULT_SHM_NAME`].
pub const SHM_NAME_VAR: &str = "MSETTINGS_SHM_NAME";
/// Device model; `brick` has the high-luminance panel.
pub const DEVICE_VAR: &str = "DEVICE";

pub const SETTINGS_FILE_NAME: &str = "msettings.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsConfig {
    pub shm_name: String,
    pub persistence_path: PathBuf,
    pub brightness_curve: BrightnessCurve,
}

impl SettingsConfig {
    /// Defaults for everything but the persistence file.
    pub fn new(persistence_path: impl Into<PathBuf>) -> Self {
        Self {
            shm_name: DEFAULT_SHM_NAME.to_owned(),
            persistence_path: persistence_path.into(),
            brightness_curve: BrightnessCurve::Standard,
        }
    }

    pub fn with_shm_name(mut self, name: impl Into<String>) -> Self {
        self.shm_name = name.into();
        self
    }

    pub fn with_brightness_curve(mut self, curve: BrightnessCurve) -> Self {
        self.brightness_curve = curve;
        self
    }

    /// Build from `USERDATA_PATH`, `MSETTINGS_SHM_NAME` and `DEVICE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let userdata = lookup(USERDATA_PATH_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SettingsError::Config(format!("{USERDATA_PATH_VAR} is not set")))?;

        let mut config = Self::new(Path::new(&userdata).join(SETTINGS_FILE_NAME));
        if let Some(name) = lookup(SHM_NAME_VAR).filter(|v| !v.is_empty()) {
            config.shm_name = name;
        }
        if lookup(DEVICE_VAR).as_deref() == Some("brick") {
            config.brightness_curve = BrightnessCurve::HighLuminance;
        }
        Ok(config)
    }
}
