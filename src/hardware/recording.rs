// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// In-memory adapter: records every write, serves scripted line state.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Channel, HardwareAdapter};

/// One successful write observed by [`RecordingHardware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareCall {
    Raw { channel: Channel, raw: i32 },
    Volume { percent: i32, jack_present: bool },
    PlaybackPath { jack_present: bool },
}

/// Adapter for tests and dry runs.
///
/// Jack/HDMI lines are whatever the test sets. With [`fail_writes`] enabled
/// every write returns an error and is counted instead of recorded.
///
/// [`fail_writes`]: RecordingHardware::fail_writes
#[derive(Debug, Default)]
pub struct RecordingHardware {
    calls: Mutex<Vec<HardwareCall>>,
    jack: AtomicBool,
    hdmi: AtomicBool,
    failing: AtomicBool,
    failed: AtomicUsize,
}

impl RecordingHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given jack/HDMI line state.
    pub fn with_lines(jack: bool, hdmi: bool) -> Self {
        let hw = Self::default();
        hw.set_jack_line(jack);
        hw.set_hdmi_status(hdmi);
        hw
    }

    pub fn set_jack_line(&self, present: bool) {
        self.jack.store(present, Ordering::Relaxed);
    }

    pub fn set_hdmi_status(&self, connected: bool) {
        self.hdmi.store(connected, Ordering::Relaxed);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::Relaxed);
    }

    /// Number of writes rejected while failing.
    pub fn failed_writes(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn calls(&self) -> Vec<HardwareCall> {
        self.lock().clone()
    }

    /// Return and forget everything recorded so far.
    pub fn take_calls(&self) -> Vec<HardwareCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Most recent raw value written to `channel`.
    pub fn last_raw(&self, channel: Channel) -> Option<i32> {
        self.lock().iter().rev().find_map(|c| match *c {
            HardwareCall::Raw { channel: ch, raw } if ch == channel => Some(raw),
            _ => None,
        })
    }

    /// Most recent mixer write as `(percent, jack_present)`.
    pub fn last_volume(&self) -> Option<(i32, bool)> {
        self.lock().iter().rev().find_map(|c| match *c {
            HardwareCall::Volume {
                percent,
                jack_present,
            } => Some((percent, jack_present)),
            _ => None,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HardwareCall>> {
        // A panicking test thread must not hide the calls from the others.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: HardwareCall) -> io::Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            self.failed.fetch_add(1, Ordering::Relaxed);
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "recording hardware: writes disabled",
            ));
        }
        self.lock().push(call);
        Ok(())
    }
}

impl HardwareAdapter for RecordingHardware {
    fn apply_raw(&self, channel: Channel, raw: i32) -> io::Result<()> {
        self.record(HardwareCall::Raw { channel, raw })
    }

    fn apply_raw_volume(&self, percent: i32, jack_present: bool) -> io::Result<()> {
        self.record(HardwareCall::Volume {
            percent,
            jack_present,
        })
    }

    fn set_playback_path(&self, jack_present: bool) -> io::Result<()> {
        self.record(HardwareCall::PlaybackPath { jack_present })
    }

    fn read_jack_line(&self) -> bool {
        self.jack.load(Ordering::Relaxed)
    }

    fn read_hdmi_status(&self) -> bool {
        self.hdmi.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let hw = RecordingHardware::new();
        hw.apply_raw(Channel::Backlight, 16).unwrap();
        hw.apply_raw_volume(40, false).unwrap();
        hw.apply_raw(Channel::Backlight, 32).unwrap();
        assert_eq!(hw.calls().len(), 3);
        assert_eq!(hw.last_raw(Channel::Backlight), Some(32));
        assert_eq!(hw.last_raw(Channel::Contrast), None);
        assert_eq!(hw.last_volume(), Some((40, false)));
        assert_eq!(hw.take_calls().len(), 3);
        assert!(hw.calls().is_empty());
    }

    #[test]
    fn failing_writes_are_counted_not_recorded() {
        let hw = RecordingHardware::new();
        hw.fail_writes(true);
        assert!(hw.apply_raw(Channel::Exposure, 50).is_err());
        assert!(hw.set_playback_path(true).is_err());
        assert_eq!(hw.failed_writes(), 2);
        assert!(hw.calls().is_empty());
    }

    #[test]
    fn scripted_lines() {
        let hw = RecordingHardware::with_lines(true, false);
        assert!(hw.read_jack_line());
        assert!(!hw.read_hdmi_status());
        hw.set_hdmi_status(true);
        assert!(hw.read_hdmi_status());
    }
}
