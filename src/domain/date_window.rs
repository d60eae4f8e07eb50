//! Evaluation window selection over date labels.
//!
//! Date labels are kept as the raw strings of the input table. A window
//! either matches labels by substring (e.g. `/2024` for one year of
//! `m/d/yyyy` labels) or parses them with a chrono format and keeps the
//! ones between two dates.

use crate::domain::price_table::EvalRange;
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_PATTERN: &str = "/2024";
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq)]
pub enum DateWindow {
    Contains(String),
    Between {
        start: NaiveDate,
        end: NaiveDate,
        format: String,
    },
}

impl Default for DateWindow {
    fn default() -> Self {
        DateWindow::Contains(DEFAULT_PATTERN.to_string())
    }
}

impl DateWindow {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            DateWindow::Contains(pattern) => label.contains(pattern.as_str()),
            DateWindow::Between { start, end, format } => {
                match NaiveDate::parse_from_str(label.trim(), format) {
                    Ok(date) => *start <= date && date <= *end,
                    Err(_) => false,
                }
            }
        }
    }

    /// First and last index whose label falls in the window.
    pub fn locate(&self, dates: &[String]) -> Option<EvalRange> {
        let start = dates.iter().position(|d| self.matches(d))?;
        let end = dates.iter().rposition(|d| self.matches(d))?;
        Some(EvalRange::new(start, end))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::Contains(pattern) => write!(f, "\"{}\"", pattern),
            DateWindow::Between { start, end, .. } => write!(f, "{} to {}", start, end),
        }
    }
}
