// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

#[cfg(unix)]
pub mod posix;

#[cfg(unix)]
pub use posix::{PlatformShm, ShmMode};

#[cfg(not(unix))]
compile_error!("msettings maps POSIX shared memory and only builds on unix targets");
