// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// SettingsStore: the shared settings record and its persistence file.
//
// The first process to create the shared region is the host: it sizes the
// region and hydrates it from disk (or defaults). Everyone else is a client
// and trusts the host's initialisation. Only the host removes the name.

use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::ptr;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::SettingsConfig;
use crate::error::{Result, SettingsError};
use crate::record::{SettingsRecord, RECORD_SIZE, SETTINGS_VERSION};
use crate::shm::{ShmHandle, ShmOpenMode};

/// Which side of the shared region this process is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Created the region; removes it on close.
    Host,
    /// Attached to an existing region; never removes it.
    Client,
}

/// Handle to the mapped settings record.
///
/// There is no mutual exclusion between processes. Every access goes
/// through [`read`](Self::read) / [`modify`](Self::modify) so a lock can be
/// added here without touching call sites.
pub struct SettingsStore {
    shm: ShmHandle,
    path: PathBuf,
}

impl SettingsStore {
    /// Exclusively create the region (→ [`Role::Host`]) or attach to the
    /// existing one (→ [`Role::Client`]).
    pub fn open(config: &SettingsConfig) -> Result<(Self, Role)> {
        let startup = |source: io::Error| SettingsError::Startup {
            name: config.shm_name.clone(),
            source,
        };

        match ShmHandle::acquire(&config.shm_name, RECORD_SIZE, ShmOpenMode::Create) {
            Ok(shm) => {
                let store = Self {
                    shm,
                    path: config.persistence_path.clone(),
                };
                let record = load_persisted(&store.path).unwrap_or_default();
                store.replace(&record);
                info!(name = store.shm.name(), path = %store.path.display(), "settings host");
                Ok((store, Role::Host))
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let shm = ShmHandle::acquire(&config.shm_name, RECORD_SIZE, ShmOpenMode::Open)
                    .map_err(startup)?;
                info!(name = shm.name(), "settings client");
                Ok((
                    Self {
                        shm,
                        path: config.persistence_path.clone(),
                    },
                    Role::Client,
                ))
            }
            Err(e) => Err(startup(e)),
        }
    }

    /// Copy of the current record.
    pub fn snapshot(&self) -> SettingsRecord {
        // Safety: the mapping is RECORD_SIZE bytes, page aligned, and lives
        // as long as `self`. Volatile: other processes write it.
        unsafe { ptr::read_volatile(self.shm.as_ptr() as *const SettingsRecord) }
    }

    /// Read from the live record.
    pub fn read<R>(&self, f: impl FnOnce(&SettingsRecord) -> R) -> R {
        f(&self.snapshot())
    }

    /// Mutate the live record. Only the words `f` actually changed are
    /// stored back, so fields owned by other processes are not clobbered.
    pub(crate) fn modify<R>(&self, f: impl FnOnce(&mut SettingsRecord) -> R) -> R {
        let before = self.snapshot();
        let mut after = before;
        let out = f(&mut after);

        let base = self.shm.as_mut_ptr() as *mut i32;
        for (i, (old, new)) in words(&before).zip(words(&after)).enumerate() {
            if old != new {
                // Safety: i < RECORD_SIZE / 4, inside the mapping.
                unsafe { base.add(i).write_volatile(new) };
            }
        }
        out
    }

    fn replace(&self, record: &SettingsRecord) {
        // Safety: see `snapshot`.
        unsafe { ptr::write_volatile(self.shm.as_mut_ptr() as *mut SettingsRecord, *record) };
    }

    /// Write the whole record to the persistence file and flush it to disk.
    ///
    /// The record goes to a sibling temp file that is renamed over the
    /// target, so a failed or interrupted write leaves the previous record
    /// intact.
    pub fn persist(&self) -> Result<()> {
        let record = self.snapshot();
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let write = || -> io::Result<()> {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))?;
            tmp.write_all(record.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&self.path).map_err(|e| e.error)?;
            File::open(dir)?.sync_all()
        };
        write().map_err(|source| SettingsError::Persist {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "settings persisted");
        Ok(())
    }

    pub fn persistence_path(&self) -> &Path {
        &self.path
    }

    /// POSIX name of the shared region.
    pub fn shm_name(&self) -> &str {
        self.shm.name()
    }

    /// Unmap the region; a host also removes the name so the next boot
    /// starts fresh.
    pub fn close(self, role: Role) {
        self.release_name(role);
    }

    pub(crate) fn release_name(&self, role: Role) {
        if role != Role::Host {
            return;
        }
        match self.shm.unlink() {
            Ok(()) => info!(name = self.shm.name(), "shared settings removed"),
            Err(e) => warn!(name = self.shm.name(), error = %e, "cannot remove shared settings"),
        }
    }
}

fn words(record: &SettingsRecord) -> impl Iterator<Item = i32> + '_ {
    record
        .as_bytes()
        .chunks_exact(4)
        .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
}

/// Load a persisted record. Missing, unreadable or wrong-sized files all
/// mean "no prior state".
pub fn load_persisted(path: &Path) -> Option<SettingsRecord> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no persisted settings, using defaults");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read persisted settings, using defaults");
            return None;
        }
    };

    let Some(record) = SettingsRecord::from_bytes(&bytes) else {
        warn!(
            path = %path.display(),
            len = bytes.len(),
            expected = RECORD_SIZE,
            "persisted settings have the wrong size, using defaults"
        );
        return None;
    };
    if record.version != SETTINGS_VERSION {
        // Same size, so the layout is assumed compatible; no migration.
        warn!(version = record.version, expected = SETTINGS_VERSION, "persisted settings version differs");
    }
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_persisted(&dir.path().join("absent.bin")).is_none());
    }

    #[test]
    fn load_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        fs::write(&path, &SettingsRecord::default().as_bytes()[..40]).unwrap();
        assert!(load_persisted(&path).is_none());
    }

    #[test]
    fn load_exact_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.bin");
        let rec = SettingsRecord {
            brightness: 9,
            contrast: -3,
            ..SettingsRecord::default()
        };
        fs::write(&path, rec.as_bytes()).unwrap();
        assert_eq!(load_persisted(&path), Some(rec));
    }

    #[test]
    fn load_other_version_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v6.bin");
        let rec = SettingsRecord {
            version: 6,
            ..SettingsRecord::default()
        };
        fs::write(&path, rec.as_bytes()).unwrap();
        assert_eq!(load_persisted(&path).map(|r| r.version), Some(6));
    }
}
