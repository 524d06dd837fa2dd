// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Shared-memory settings broker.
// One host process owns the persisted display/audio settings record in a
// named POSIX shared memory region; every other process maps the same bytes.

pub mod config;
pub mod error;
pub mod hardware;
pub mod logging;
pub mod record;
pub mod scaling;
pub mod shm_name;

mod accessors;
mod platform;

mod shm;
pub use shm::{ShmHandle, ShmOpenMode};

mod store;
pub use store::{load_persisted, Role, SettingsStore};

mod session;
pub use session::{Setting, SettingsSession};

pub use config::SettingsConfig;
pub use error::{Result, SettingsError};
pub use record::SettingsRecord;
