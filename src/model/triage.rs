//! Triage policy: classify a duration against the warning/error thresholds.

use anyhow::bail;
use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;

/// Ordered so that `Normal < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Within both thresholds; nothing is reported.
    Normal,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minute thresholds. Both bands are strict on their lower bound: a duration
/// must be *longer* than `warn_after` to warn and longer than `error_after`
/// to error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warn_after_min: u32,
    error_after_min: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn_after_min: 5,
            error_after_min: 10,
        }
    }
}

impl Thresholds {
    pub fn new(warn_after_min: u32, error_after_min: u32) -> anyhow::Result<Self> {
        if warn_after_min >= error_after_min {
            bail!(
                "warning threshold ({} min) must be below error threshold ({} min)",
                warn_after_min,
                error_after_min
            );
        }
        Ok(Self {
            warn_after_min,
            error_after_min,
        })
    }

    pub fn warn_after_min(&self) -> u32 {
        self.warn_after_min
    }

    pub fn error_after_min(&self) -> u32 {
        self.error_after_min
    }

    /// Error band is checked first. Negative durations fall through to
    /// `Normal` like any other short duration.
    pub fn triage(&self, duration: TimeDelta) -> Severity {
        if duration > TimeDelta::minutes(self.error_after_min.into()) {
            Severity::Error
        } else if duration > TimeDelta::minutes(self.warn_after_min.into()) {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Human wording of the threshold a severity crossed.
    pub fn exceeded(&self, severity: Severity) -> Option<String> {
        let minutes = match severity {
            Severity::Normal => return None,
            Severity::Warning => self.warn_after_min,
            Severity::Error => self.error_after_min,
        };
        Some(format!("exceeded {} minutes", minutes))
    }
}
