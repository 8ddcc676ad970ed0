//! Aggregation model: correlate START/END rows per process id, compute the
//! elapsed time and triage it.

pub mod triage;

pub use triage::{Severity, Thresholds};

use crate::event::{Event, EventKind, EventParser};
use crate::Result;
use crate::report::{Finding, Reporter};
use chrono::{NaiveTime, TimeDelta};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything seen so far for one process id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: String,
    /// Only a START row carries a description.
    pub description: Option<String>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    /// `end - start`; present only once both endpoints have been seen.
    pub duration: Option<TimeDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Both endpoints seen.
    Completed,
    /// START without END.
    Open,
    /// END without START.
    Orphaned,
}

impl ProcessRecord {
    fn new(pid: String) -> Self {
        Self {
            pid,
            description: None,
            start: None,
            end: None,
            duration: None,
        }
    }

    pub fn state(&self) -> ProcessState {
        match (self.start, self.end) {
            (Some(_), Some(_)) => ProcessState::Completed,
            (Some(_), None) => ProcessState::Open,
            (None, _) => ProcessState::Orphaned,
        }
    }

    /// Overwrite the endpoint named by `event` (last write wins) and return
    /// the recomputed duration when both endpoints are present.
    fn apply(&mut self, event: Event) -> Option<TimeDelta> {
        match event.kind {
            EventKind::Start => {
                self.description = Some(event.description);
                self.start = Some(event.at);
            }
            EventKind::End => self.end = Some(event.at),
        }

        let (start, end) = (self.start?, self.end?);
        let duration = end - start;
        self.duration = Some(duration);
        Some(duration)
    }

    fn label(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => format!("Process {} ({})", self.pid, desc),
            _ => format!("Process {}", self.pid),
        }
    }
}

/// Process records keyed by pid; ordered so reports are stable.
pub type ProcessTable = BTreeMap<String, ProcessRecord>;

/// Counters for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub skipped_rows: usize,
    pub completed: usize,
    pub open: usize,
    pub orphaned: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Owns the pid -> record map for one run.
///
/// Rows are fed one at a time in input order; each accepted row may produce
/// at most one report. A pid that receives several END rows is re-triaged
/// (and possibly re-reported) each time.
#[derive(Debug)]
pub struct DurationAggregator {
    parser: EventParser,
    thresholds: Thresholds,
    records: ProcessTable,
    rows: usize,
    skipped_rows: usize,
    warnings: usize,
    errors: usize,
}

impl DurationAggregator {
    pub fn new(thresholds: Thresholds) -> Result<Self> {
        Ok(Self {
            parser: EventParser::new()?,
            thresholds,
            records: ProcessTable::new(),
            rows: 0,
            skipped_rows: 0,
            warnings: 0,
            errors: 0,
        })
    }

    /// Parse one row and apply it. Malformed rows are counted and skipped.
    pub fn ingest_row<S, R>(&mut self, row: &[S], reporter: &mut R)
    where
        S: AsRef<str>,
        R: Reporter + ?Sized,
    {
        self.rows += 1;

        let event = match self.parser.parse(row) {
            Ok(event) => event,
            Err(err) => {
                self.skipped_rows += 1;
                tracing::debug!(row = self.rows, reason = %err, "skipping malformed row");
                return;
            }
        };

        if let Some(finding) = self.apply(event) {
            match finding.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Normal => {}
            }
            reporter.report(finding.severity, &finding.message);
        }
    }

    /// Apply an already-parsed event. Returns the finding to report, if the
    /// recomputed duration crossed a threshold.
    pub fn apply(&mut self, event: Event) -> Option<Finding> {
        let record = self
            .records
            .entry(event.pid.clone())
            .or_insert_with(|| ProcessRecord::new(event.pid.clone()));

        let duration = record.apply(event)?;
        let severity = self.thresholds.triage(duration);
        tracing::debug!(
            pid = %record.pid,
            duration_secs = duration.num_seconds(),
            %severity,
            "computed duration"
        );

        let exceeded = self.thresholds.exceeded(severity)?;
        Some(Finding {
            severity,
            message: format!(
                "{} {}: took {}",
                record.label(),
                exceeded,
                format_duration(duration)
            ),
        })
    }

    pub fn records(&self) -> &ProcessTable {
        &self.records
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            rows: self.rows,
            skipped_rows: self.skipped_rows,
            warnings: self.warnings,
            errors: self.errors,
            ..RunSummary::default()
        };
        for record in self.records.values() {
            match record.state() {
                ProcessState::Completed => summary.completed += 1,
                ProcessState::Open => summary.open += 1,
                ProcessState::Orphaned => summary.orphaned += 1,
            }
        }
        summary
    }
}

/// Run every row through a fresh aggregator, in order.
pub fn aggregate<S, R>(
    rows: &[Vec<S>],
    thresholds: Thresholds,
    reporter: &mut R,
) -> Result<DurationAggregator>
where
    S: AsRef<str>,
    R: Reporter + ?Sized,
{
    let mut aggregator = DurationAggregator::new(thresholds)?;
    for row in rows {
        aggregator.ingest_row(row, reporter);
    }
    Ok(aggregator)
}

/// `HH:MM:SS`, with a leading `-` for negative durations.
pub fn format_duration(duration: TimeDelta) -> String {
    let secs = duration.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessView {
    pub pid: String,
    pub description: Option<String>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub duration_secs: Option<i64>,
    pub state: ProcessState,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub summary: RunSummary,
    pub findings: Vec<Finding>,
    pub processes: Vec<ProcessView>,
}

/// Build the serializable run report.
pub fn build_report_data(aggregator: &DurationAggregator, findings: Vec<Finding>) -> ReportData {
    let processes = aggregator
        .records()
        .values()
        .map(|r| ProcessView {
            pid: r.pid.clone(),
            description: r.description.clone(),
            start: r.start,
            end: r.end,
            duration_secs: r.duration.map(|d| d.num_seconds()),
            state: r.state(),
        })
        .collect();

    ReportData {
        summary: aggregator.summary(),
        findings,
        processes,
    }
}
