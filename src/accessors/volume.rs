// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

use tracing::debug;

use super::{absorb, clamp_logged, persist};
use crate::hardware::HardwareAdapter;
use crate::record::VOLUME_RANGE;
use crate::scaling::{self, MAX_RAW_VOLUME};
use crate::store::SettingsStore;

/// Output volume, routed to the headphone or speaker level by `jack`.
pub(crate) struct Volume<'a, H> {
    store: &'a SettingsStore,
    hw: &'a H,
}

impl<'a, H: HardwareAdapter> Volume<'a, H> {
    pub(crate) fn new(store: &'a SettingsStore, hw: &'a H) -> Self {
        Self { store, hw }
    }

    pub(crate) fn get(&self) -> i32 {
        self.store.read(|r| r.effective_volume())
    }

    /// Returns `false` when the change was suppressed because HDMI owns the
    /// audio output; nothing is written or persisted in that case.
    pub(crate) fn set(&self, value: i32) -> bool {
        let value = clamp_logged("volume", &VOLUME_RANGE, value);
        let (hdmi, jack) = self.store.read(|r| (r.hdmi_active(), r.jack_present()));
        if hdmi {
            debug!(value, "hdmi active, volume unchanged");
            return false;
        }

        absorb("volume", self.hw.apply_raw_volume(scaling::volume(value), jack));
        self.store.modify(|r| {
            if jack {
                r.headphone_volume = value;
            } else {
                r.speaker_volume = value;
            }
        });
        persist(self.store);
        true
    }

    /// Re-apply the stored level for the current jack state.
    pub(crate) fn restore(&self) -> bool {
        self.set(self.get())
    }

    /// Drive the mixer to full scale without touching the logical levels.
    pub(crate) fn force_max(&self) {
        let jack = self.store.read(|r| r.jack_present());
        absorb("volume", self.hw.apply_raw_volume(MAX_RAW_VOLUME, jack));
    }
}
