// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Per-setting get/set on top of the store.
//
// Every set clamps, applies to hardware, writes the record, then persists.
// Failures are logged and swallowed: callers always see success.

use std::io;
use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::record::clamp_to;
use crate::store::SettingsStore;

mod display;
mod lines;
mod muted;
mod volume;

pub(crate) use display::Display;
pub(crate) use lines::Lines;
pub(crate) use muted::Muted;
pub(crate) use volume::Volume;

fn clamp_logged(setting: &'static str, range: &RangeInclusive<i32>, value: i32) -> i32 {
    let clamped = clamp_to(range, value);
    if clamped != value {
        debug!(setting, value, clamped, "value out of range, clamped");
    }
    clamped
}

fn absorb(setting: &'static str, result: io::Result<()>) {
    if let Err(e) = result {
        warn!(setting, error = %e, "hardware write failed");
    }
}

fn persist(store: &SettingsStore) {
    if let Err(e) = store.persist() {
        warn!(error = %e, "settings not persisted");
    }
}
