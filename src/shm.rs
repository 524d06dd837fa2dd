// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Named shared memory handle.
// Delegates to platform::PlatformShm.

use std::io;

use crate::platform::{PlatformShm, ShmMode};

/// Open mode for shared memory segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShmOpenMode {
    /// Create exclusively — fail with `AlreadyExists` if the name is taken.
    Create,
    /// Open existing — fail if it does not exist.
    Open,
}

/// A named, inter-process shared memory region.
///
/// Dropping the handle unmaps the region but never removes the name; call
/// [`ShmHandle::unlink`] for that.
pub struct ShmHandle {
    inner: PlatformShm,
}

impl ShmHandle {
    /// Acquire a named shared memory region of exactly `size` bytes.
    pub fn acquire(name: &str, size: usize, mode: ShmOpenMode) -> io::Result<Self> {
        let platform_mode = match mode {
            ShmOpenMode::Create => ShmMode::Create,
            ShmOpenMode::Open => ShmMode::Open,
        };
        let inner = PlatformShm::acquire(name, size, platform_mode)?;
        Ok(Self { inner })
    }

    /// Pointer to the start of the shared memory region.
    pub fn as_ptr(&self) -> *const u8 {
        self.inner.as_ptr()
    }

    /// Mutable pointer to the start of the shared memory region.
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.inner.as_mut_ptr()
    }

    /// Mapped size in bytes.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// The platform name used to open the segment.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Remove the name so the next exclusive create succeeds. Existing
    /// mappings (ours included) stay valid until unmapped.
    pub fn unlink(&self) -> io::Result<()> {
        self.inner.unlink()
    }

    /// Remove a named segment without needing an open handle.
    pub fn unlink_by_name(name: &str) -> io::Result<()> {
        PlatformShm::unlink_by_name(name)
    }
}
