// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Error types. Only startup and configuration errors reach callers;
// persistence and hardware failures are absorbed by the accessors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The shared region could not be created or opened. Fatal: the
    /// session never becomes active.
    #[error("cannot map shared settings '{name}': {source}")]
    Startup {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot persist settings to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
