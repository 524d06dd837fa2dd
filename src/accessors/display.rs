// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

use std::ops::RangeInclusive;

use tracing::debug;

use super::{absorb, clamp_logged, persist};
use crate::hardware::{Channel, HardwareAdapter};
use crate::record::{
    SettingsRecord, BRIGHTNESS_RANGE, COLOR_TEMPERATURE_RANGE, CONTRAST_RANGE, EXPOSURE_RANGE,
    SATURATION_RANGE,
};
use crate::scaling::{self, BrightnessCurve};
use crate::store::SettingsStore;

/// Panel settings: backlight plus the colour enhancement channels.
pub(crate) struct Display<'a, H> {
    store: &'a SettingsStore,
    hw: &'a H,
    curve: BrightnessCurve,
}

impl<'a, H: HardwareAdapter> Display<'a, H> {
    pub(crate) fn new(store: &'a SettingsStore, hw: &'a H, curve: BrightnessCurve) -> Self {
        Self { store, hw, curve }
    }

    pub(crate) fn brightness(&self) -> i32 {
        self.store.read(|r| r.brightness)
    }

    /// Suppressed entirely while HDMI is active: the external display
    /// manages its own brightness.
    pub(crate) fn set_brightness(&self, value: i32) {
        let value = clamp_logged("brightness", &BRIGHTNESS_RANGE, value);
        if self.store.read(|r| r.hdmi_active()) {
            debug!(value, "hdmi active, brightness unchanged");
            return;
        }
        let raw = scaling::brightness(self.curve, value);
        self.apply(Channel::Backlight, raw, |r| r.brightness = value);
    }

    pub(crate) fn restore_brightness(&self) {
        self.set_brightness(self.brightness());
    }

    pub(crate) fn color_temperature(&self) -> i32 {
        self.store.read(|r| r.color_temperature)
    }

    pub(crate) fn set_color_temperature(&self, value: i32) {
        self.set_level(
            Channel::ColorTemperature,
            &COLOR_TEMPERATURE_RANGE,
            value,
            scaling::color_temperature,
            |r, v| r.color_temperature = v,
        );
    }

    pub(crate) fn contrast(&self) -> i32 {
        self.store.read(|r| r.contrast)
    }

    pub(crate) fn set_contrast(&self, value: i32) {
        self.set_level(
            Channel::Contrast,
            &CONTRAST_RANGE,
            value,
            scaling::contrast,
            |r, v| r.contrast = v,
        );
    }

    pub(crate) fn saturation(&self) -> i32 {
        self.store.read(|r| r.saturation)
    }

    pub(crate) fn set_saturation(&self, value: i32) {
        self.set_level(
            Channel::Saturation,
            &SATURATION_RANGE,
            value,
            scaling::saturation,
            |r, v| r.saturation = v,
        );
    }

    pub(crate) fn exposure(&self) -> i32 {
        self.store.read(|r| r.exposure)
    }

    pub(crate) fn set_exposure(&self, value: i32) {
        self.set_level(
            Channel::Exposure,
            &EXPOSURE_RANGE,
            value,
            scaling::exposure,
            |r, v| r.exposure = v,
        );
    }

    fn set_level(
        &self,
        channel: Channel,
        range: &RangeInclusive<i32>,
        value: i32,
        scale: fn(i32) -> i32,
        store: fn(&mut SettingsRecord, i32),
    ) {
        let value = clamp_logged(channel_name(channel), range, value);
        self.apply(channel, scale(value), |r| store(r, value));
    }

    fn apply(&self, channel: Channel, raw: i32, write: impl FnOnce(&mut SettingsRecord)) {
        absorb(channel_name(channel), self.hw.apply_raw(channel, raw));
        self.store.modify(write);
        persist(self.store);
    }
}

fn channel_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Backlight => "brightness",
        Channel::ColorTemperature => "color_temperature",
        Channel::Contrast => "contrast",
        Channel::Saturation => "saturation",
        Channel::Exposure => "exposure",
    }
}
