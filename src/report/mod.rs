//! Reporting sinks. The aggregator only knows the [`Reporter`] trait; where a
//! finding ends up (stderr, a JSON document) is decided by the caller.

pub mod json;

pub use json::render_json_report;

use crate::model::Severity;
use serde::Serialize;
use std::io::{self, Write};

pub const APP_NAME: &str = "LOG Monitor";

/// Receives one call per duration that crossed a threshold. `severity` is
/// always [`Severity::Warning`] or [`Severity::Error`].
pub trait Reporter {
    fn report(&mut self, severity: Severity, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

/// Keeps findings in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub findings: Vec<Finding>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        self.findings.push(Finding {
            severity,
            message: message.to_string(),
        });
    }
}

/// Writes `[LOG Monitor][WARN] ...` / `[LOG Monitor][ERROR] ...` lines.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Error => "ERROR",
            Severity::Warning | Severity::Normal => "WARN",
        };
        // A closed stderr must not abort the run.
        if let Err(err) = writeln!(self.out, "[{}][{}] {}", APP_NAME, tag, message) {
            tracing::debug!(error = %err, "failed to write finding");
        }
    }
}

#[cfg(test)]
impl CollectingReporter {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}
