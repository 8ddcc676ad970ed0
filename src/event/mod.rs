//! Event parser: turn one row of cells into a typed lifecycle event.
//!
//! Expected cells:
//! timestamp  description  kind  process-id
//!
//! Example:
//! 00:06:00,Task End,END,1

mod time;

use time::TimeOfDayParser;

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Start,
    End,
}

impl EventKind {
    /// Only a case-insensitive "START" (ignoring surrounding whitespace) is a
    /// start; every other value closes the process.
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("START") {
            EventKind::Start
        } else {
            EventKind::End
        }
    }
}

/// A parsed lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub pid: String,
    pub kind: EventKind,
    pub at: NaiveTime,
    pub description: String,
}

/// Why a row was rejected. Rejected rows are skipped, never reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected 4 cells, found {found}")]
    CellCount { found: usize },

    #[error("timestamp {value:?} is not HH:MM:SS")]
    Timestamp { value: String },

    #[error("timestamp {value:?} is not a valid time of day")]
    TimestampRange { value: String },
}

/// Stateless row parser; holds only the compiled timestamp pattern.
#[derive(Debug, Clone)]
pub struct EventParser {
    time: TimeOfDayParser,
}

impl EventParser {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            time: TimeOfDayParser::new()?,
        })
    }

    /// Parse `[timestamp, description, kind, pid]` into an [`Event`].
    pub fn parse<S: AsRef<str>>(&self, row: &[S]) -> Result<Event, RowError> {
        let [at, description, kind, pid] = row else {
            return Err(RowError::CellCount { found: row.len() });
        };

        Ok(Event {
            pid: pid.as_ref().trim().to_string(),
            kind: EventKind::from_cell(kind.as_ref()),
            at: self.time.parse(at.as_ref())?,
            description: description.as_ref().to_string(),
        })
    }
}
