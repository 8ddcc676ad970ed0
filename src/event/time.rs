use super::RowError;
use chrono::NaiveTime;
use regex::Regex;

/// Parses `HH:MM:SS` cells into a time of day.
#[derive(Debug, Clone)]
pub struct TimeOfDayParser {
    re: Regex,
}

impl TimeOfDayParser {
    pub fn new() -> anyhow::Result<Self> {
        // Each component is 1-2 digits; ranges are left to chrono.
        let re = Regex::new(r"^([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})$")?;
        Ok(Self { re })
    }

    /// Surrounding whitespace is ignored. Hour must be 0-23, minute and
    /// second 0-59; anything else is rejected rather than wrapped.
    pub fn parse(&self, cell: &str) -> Result<NaiveTime, RowError> {
        let value = cell.trim();
        let caps = self.re.captures(value).ok_or_else(|| RowError::Timestamp {
            value: value.to_string(),
        })?;

        let component = |idx: usize| -> u32 { caps[idx].parse().unwrap_or(u32::MAX) };

        NaiveTime::from_hms_opt(component(1), component(2), component(3)).ok_or_else(|| {
            RowError::TimestampRange {
                value: value.to_string(),
            }
        })
    }
}
