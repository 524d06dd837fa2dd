// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Command-line front end for the shared settings.
//
// Usage:
//   msettings host                 hold the region until SIGINT/SIGTERM
//   msettings show                 print every setting
//   msettings get <setting>
//   msettings set <setting> <value>
//
// USERDATA_PATH must point at the user data directory. Whichever process
// opens first becomes host; `host` is meant for the input daemon.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use msettings::hardware::{HardwareAdapter, RecordingHardware, SysfsHardware};
use msettings::logging::init_logging;
use msettings::{Setting, SettingsConfig, SettingsSession};

#[derive(Parser, Debug)]
#[command(name = "msettings", version, about = "Read and change the shared device settings")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Do not touch sysfs or the mixer; hardware writes are only logged
    #[arg(long, global = true)]
    no_hardware: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the settings and keep them mapped until interrupted
    Host,
    /// Print every setting
    Show,
    /// Print one setting
    Get { setting: Setting },
    /// Change one setting
    Set {
        setting: Setting,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match SettingsConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.no_hardware {
        run(&cli.command, &config, RecordingHardware::new())
    } else {
        run(&cli.command, &config, SysfsHardware::default())
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run<H: HardwareAdapter>(
    command: &Command,
    config: &SettingsConfig,
    hardware: H,
) -> msettings::Result<()> {
    let session = SettingsSession::open(config, hardware)?;
    match command {
        Command::Host => hold(&session),
        Command::Show => {
            for setting in Setting::ALL {
                println!("{setting}: {}", session.get(setting));
            }
        }
        Command::Get { setting } => println!("{}", session.get(*setting)),
        Command::Set { setting, value } => {
            session.set(*setting, *value);
            println!("{setting}: {}", session.get(*setting));
        }
    }
    session.close();
    Ok(())
}

fn hold<H: HardwareAdapter>(session: &SettingsSession<H>) {
    on_termination();
    info!(role = ?session.role(), name = session.store().shm_name(), "holding shared settings");
    while !QUIT.load(Ordering::Acquire) {
        thread::sleep(Duration::from_millis(200));
    }
}

// Set from the signal handler; an atomic store is async-signal-safe.
static QUIT: AtomicBool = AtomicBool::new(false);

extern "C" fn request_quit(_: libc::c_int) {
    QUIT.store(true, Ordering::Release);
}

// Sets QUIT on SIGINT / SIGTERM / SIGHUP.
fn on_termination() {
    let handler = request_quit as extern "C" fn(libc::c_int) as libc::sighandler_t;
    unsafe {
        libc::signal(libc::SIGINT, handler);
        libc::signal(libc::SIGTERM, handler);
        libc::signal(libc::SIGHUP, handler);
    }
}
