/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde_json::Value;

pub const CHANNEL_BOUNDARY_CAUGHT: &str = "shell.boundary.caught";
pub const CHANNEL_BOUNDARY_RESET: &str = "shell.boundary.reset";
pub const CHANNEL_BOUNDARY_GO_HOME: &str = "shell.boundary.go_home";
pub const CHANNEL_NAVIGATION_MARKER_WRITTEN: &str = "shell.navigation.marker_written";
pub const CHANNEL_NAVIGATION_MARKER_KEPT: &str = "shell.navigation.marker_kept";
pub const CHANNEL_REGISTRY_PROJECT_LOOKUP_FAILED: &str = "registry.project.lookup_failed";
pub const CHANNEL_SESSION_STORE_WRITE_FAILED: &str = "session.store.write_failed";

/// Severity tier used when mirroring an event into the log facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelSeverity {
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    pub channel_id: &'static str,
    pub severity: ChannelSeverity,
    pub message: String,
    pub detail: Value,
}

impl DiagnosticEvent {
    pub fn new(
        channel_id: &'static str,
        severity: ChannelSeverity,
        message: impl Into<String>,
        detail: Value,
    ) -> Self {
        Self {
            channel_id,
            severity,
            message: message.into(),
            detail,
        }
    }

    pub fn info(channel_id: &'static str, message: impl Into<String>, detail: Value) -> Self {
        Self::new(channel_id, ChannelSeverity::Info, message, detail)
    }

    pub fn warn(channel_id: &'static str, message: impl Into<String>, detail: Value) -> Self {
        Self::new(channel_id, ChannelSeverity::Warn, message, detail)
    }

    pub fn error(channel_id: &'static str, message: impl Into<String>, detail: Value) -> Self {
        Self::new(channel_id, ChannelSeverity::Error, message, detail)
    }
}

/// Append-only destination for diagnostic events.
///
/// Implementations must not report failure back to the caller: a sink that
/// cannot deliver an event drops it.
pub trait DiagnosticSink {
    fn record(&self, event: DiagnosticEvent);
}

impl DiagnosticSink for Sender<DiagnosticEvent> {
    fn record(&self, event: DiagnosticEvent) {
        let _ = self.send(event);
    }
}

/// Sink for callers that only want the log line [`emit_event`] already
/// writes. Recorded events are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, _event: DiagnosticEvent) {}
}

/// Create an unbounded diagnostics channel.
pub fn diagnostics_channel() -> (Sender<DiagnosticEvent>, Receiver<DiagnosticEvent>) {
    unbounded()
}

/// Mirror an event into the log facade, then hand it to `sink`.
pub fn emit_event(sink: &dyn DiagnosticSink, event: DiagnosticEvent) {
    log_event(&event);
    sink.record(event);
}

fn log_event(event: &DiagnosticEvent) {
    let level = match event.severity {
        ChannelSeverity::Info => log::Level::Debug,
        ChannelSeverity::Warn => log::Level::Warn,
        ChannelSeverity::Error => log::Level::Error,
    };
    log::log!(level, "[{}] {} {}", event.channel_id, event.message, event.detail);
}
