// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

use std::ops::RangeInclusive;

use super::persist;
use crate::record::{
    clamp_muted, SettingsRecord, BRIGHTNESS_RANGE, COLOR_TEMPERATURE_RANGE, CONTRAST_RANGE,
    EXPOSURE_RANGE, SATURATION_RANGE,
};
use crate::store::SettingsStore;

/// Per-channel targets for the muted profile. Stored and persisted only;
/// whoever implements mute applies them. `NO_CHANGE` leaves a channel alone.
pub(crate) struct Muted<'a> {
    store: &'a SettingsStore,
}

impl<'a> Muted<'a> {
    pub(crate) fn new(store: &'a SettingsStore) -> Self {
        Self { store }
    }

    pub(crate) fn brightness(&self) -> i32 {
        self.store.read(|r| r.muted_brightness)
    }

    pub(crate) fn set_brightness(&self, value: i32) {
        self.set(&BRIGHTNESS_RANGE, value, |r, v| r.muted_brightness = v);
    }

    pub(crate) fn color_temperature(&self) -> i32 {
        self.store.read(|r| r.muted_color_temperature)
    }

    pub(crate) fn set_color_temperature(&self, value: i32) {
        self.set(&COLOR_TEMPERATURE_RANGE, value, |r, v| {
            r.muted_color_temperature = v
        });
    }

    pub(crate) fn contrast(&self) -> i32 {
        self.store.read(|r| r.muted_contrast)
    }

    pub(crate) fn set_contrast(&self, value: i32) {
        self.set(&CONTRAST_RANGE, value, |r, v| r.muted_contrast = v);
    }

    pub(crate) fn saturation(&self) -> i32 {
        self.store.read(|r| r.muted_saturation)
    }

    pub(crate) fn set_saturation(&self, value: i32) {
        self.set(&SATURATION_RANGE, value, |r, v| r.muted_saturation = v);
    }

    pub(crate) fn exposure(&self) -> i32 {
        self.store.read(|r| r.muted_exposure)
    }

    pub(crate) fn set_exposure(&self, value: i32) {
        self.set(&EXPOSURE_RANGE, value, |r, v| r.muted_exposure = v);
    }

    fn set(&self, range: &RangeInclusive<i32>, value: i32, store: fn(&mut SettingsRecord, i32)) {
        let value = clamp_muted(range, value);
        self.store.modify(|r| store(r, value));
        persist(self.store);
    }
}
