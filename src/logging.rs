// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Subscriber setup for binaries. The library only emits `tracing` events.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity level; `quiet` wins.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "msettings=error";
    }
    match verbose {
        0 => "msettings=info",
        1 => "msettings=debug",
        _ => "msettings=trace",
    }
}

/// Install a stderr fmt subscriber. `RUST_LOG` overrides the verbosity flags.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
