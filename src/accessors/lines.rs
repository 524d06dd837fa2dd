// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

use tracing::info;

use super::{persist, Display, Volume};
use crate::hardware::HardwareAdapter;
use crate::store::SettingsStore;

/// Jack and HDMI flags. The only setters that cascade into another
/// setting's hardware application, through the collaborators held here.
pub(crate) struct Lines<'a, H> {
    store: &'a SettingsStore,
    volume: Volume<'a, H>,
    display: Display<'a, H>,
}

impl<'a, H: HardwareAdapter> Lines<'a, H> {
    pub(crate) fn new(store: &'a SettingsStore, volume: Volume<'a, H>, display: Display<'a, H>) -> Self {
        Self {
            store,
            volume,
            display,
        }
    }

    pub(crate) fn jack(&self) -> bool {
        self.store.read(|r| r.jack_present())
    }

    /// Switching outputs re-applies the level stored for the new output.
    pub(crate) fn set_jack(&self, present: bool) {
        self.store.modify(|r| r.jack = i32::from(present));
        info!(present, "jack");
        if !self.volume.restore() {
            persist(self.store);
        }
    }

    pub(crate) fn hdmi(&self) -> bool {
        self.store.read(|r| r.hdmi_active())
    }

    /// Active: mixer to full scale, brightness left alone. Inactive:
    /// logical volume and brightness are applied again.
    pub(crate) fn set_hdmi(&self, active: bool) {
        self.store.modify(|r| r.hdmi = i32::from(active));
        info!(active, "hdmi");
        if active {
            self.volume.force_max();
            persist(self.store);
        } else {
            self.volume.restore();
            self.display.restore_brightness();
        }
    }
}
