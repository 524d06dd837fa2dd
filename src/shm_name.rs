// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// POSIX shm name normalisation.

use std::io;

/// Name used by every process on the device unless overridden.
pub const DEFAULT_SHM_NAME: &str = "/SharedSettings";

/// Linux `NAME_MAX`; the leading '/' is not part of the file name under
/// /dev/shm.
pub const SHM_NAME_MAX: usize = 255;

/// Produce a POSIX shm-safe name (with leading '/').
///
/// `"SharedSettings"` and `"/SharedSettings"` name the same object. Empty
/// names, names with an interior '/' or a NUL byte, and names longer than
/// [`SHM_NAME_MAX`] are rejected.
pub fn make_shm_name(name: &str) -> io::Result<String> {
    let body = name.strip_prefix('/').unwrap_or(name);
    if body.is_empty() {
        return Err(invalid("name is empty"));
    }
    if body.contains('/') {
        return Err(invalid("name must not contain '/' after the leading one"));
    }
    if body.contains('\0') {
        return Err(invalid("name must not contain NUL"));
    }
    if body.len() > SHM_NAME_MAX {
        return Err(invalid("name is longer than NAME_MAX"));
    }
    Ok(format!("/{body}"))
}

fn invalid(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}
