// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Shared test fixtures: an isolated shm name and persistence directory.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use msettings::hardware::RecordingHardware;
use msettings::{SettingsConfig, SettingsRecord, SettingsSession};
use tempfile::TempDir;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn unique_name(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("/msettings_{prefix}_{n}_{}", std::process::id())
}

pub struct Fixture {
    pub dir: TempDir,
    pub config: SettingsConfig,
}

impl Fixture {
    pub fn new(prefix: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            SettingsConfig::new(dir.path().join("msettings.bin")).with_shm_name(unique_name(prefix));
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        &self.config.persistence_path
    }

    pub fn write_persisted(&self, record: &SettingsRecord) {
        std::fs::write(self.path(), record.as_bytes()).expect("write persisted record");
    }

    pub fn read_persisted(&self) -> SettingsRecord {
        let bytes = std::fs::read(self.path()).expect("read persisted record");
        SettingsRecord::from_bytes(&bytes).expect("persisted record has the right size")
    }

    pub fn open(&self) -> SettingsSession<RecordingHardware> {
        self.open_with(RecordingHardware::new())
    }

    pub fn open_with(&self, hw: RecordingHardware) -> SettingsSession<RecordingHardware> {
        SettingsSession::open(&self.config, hw).expect("open session")
    }

    /// Open, then forget the calls made by the startup sync.
    pub fn open_quiet(&self) -> SettingsSession<RecordingHardware> {
        let session = self.open();
        session.hardware().take_calls();
        session
    }
}
