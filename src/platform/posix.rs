// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// POSIX shared memory: shm_open + ftruncate + mmap.
// The mapped region is exactly the requested size; there is no trailing
// bookkeeping, so the bytes can be mirrored to disk unchanged.

use std::ffi::CString;
use std::io;
use std::ptr;

use crate::shm_name;

/// Open mode flags for [`PlatformShm::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShmMode {
    /// `O_CREAT | O_EXCL`: fails with `EEXIST` if the name is taken.
    Create,
    /// `O_RDWR` on an existing name.
    Open,
}

pub struct PlatformShm {
    mem: *mut u8,
    size: usize,
    name: String, // POSIX name (with leading '/')
}

// Safety: the mapping may be moved to another thread; concurrent use from
// several threads is not allowed (no `Sync`).
unsafe impl Send for PlatformShm {}

impl PlatformShm {
    /// Acquire a named shared memory region of `size` bytes.
    ///
    /// With [`ShmMode::Create`] the object is sized with `ftruncate` before it
    /// is mapped; if sizing or mapping fails the freshly created name is
    /// unlinked again so no zero-length object is left behind.
    pub fn acquire(name: &str, size: usize, mode: ShmMode) -> io::Result<Self> {
        if size == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "size is 0"));
        }

        let posix_name = shm_name::make_shm_name(name)?;
        let c_name = CString::new(posix_name.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let perms: libc::mode_t = 0o644;
        let flags = match mode {
            ShmMode::Create => libc::O_RDWR | libc::O_CREAT | libc::O_EXCL,
            ShmMode::Open => libc::O_RDWR,
        };

        let fd = unsafe { libc::shm_open(c_name.as_ptr(), flags, perms as libc::c_uint) };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }

        let sized = match mode {
            ShmMode::Create => {
                let ret = unsafe { libc::ftruncate(fd, size as libc::off_t) };
                if ret != 0 {
                    Err(io::Error::last_os_error())
                } else {
                    Ok(())
                }
            }
            ShmMode::Open => Self::check_size(fd, size),
        };
        if let Err(e) = sized {
            unsafe { libc::close(fd) };
            if mode == ShmMode::Create {
                unsafe { libc::shm_unlink(c_name.as_ptr()) };
            }
            return Err(e);
        }

        match Self::mmap_and_finish(fd, size, posix_name) {
            Ok(shm) => Ok(shm),
            Err(e) => {
                if mode == ShmMode::Create {
                    unsafe { libc::shm_unlink(c_name.as_ptr()) };
                }
                Err(e)
            }
        }
    }

    /// An existing object that is still shorter than `size` has not been
    /// sized by its creator yet; touching it would raise SIGBUS.
    fn check_size(fd: i32, size: usize) -> io::Result<()> {
        let mut st: libc::stat = unsafe { std::mem::zeroed() };
        if unsafe { libc::fstat(fd, &mut st) } != 0 {
            return Err(io::Error::last_os_error());
        }
        if (st.st_size as u64) < size as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "shared memory object is {} bytes, expected at least {size}",
                    st.st_size
                ),
            ));
        }
        Ok(())
    }

    fn mmap_and_finish(fd: i32, size: usize, posix_name: String) -> io::Result<Self> {
        let mem = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        unsafe { libc::close(fd) };

        if mem == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            mem: mem as *mut u8,
            size,
            name: posix_name,
        })
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.mem
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.mem
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// POSIX name (with leading '/').
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remove the name (shm_unlink). Does NOT release the mapping.
    pub fn unlink(&self) -> io::Result<()> {
        let c_name = CString::new(self.name.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        if unsafe { libc::shm_unlink(c_name.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Unlink a named segment without an open handle.
    pub fn unlink_by_name(name: &str) -> io::Result<()> {
        let posix_name = shm_name::make_shm_name(name)?;
        let c_name = CString::new(posix_name.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        if unsafe { libc::shm_unlink(c_name.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for PlatformShm {
    fn drop(&mut self) {
        if self.mem.is_null() {
            return;
        }
        // Unmapping never removes the name; that is the owner's call.
        unsafe { libc::munmap(self.mem as *mut libc::c_void, self.size) };
        self.mem = ptr::null_mut();
    }
}
