//! Log dates
//!
//! Days are keyed by ISO `YYYY-MM-DD` dates. "Today" comes from a
//! [`DateSource`] read once per session; there is no midnight rollover.

use crate::error::ValidationError;
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;

/// Provides the current calendar date
pub trait DateSource: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Where a day starts
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Local midnight
    #[default]
    Local,
    /// UTC midnight
    Utc,
}

impl std::str::FromStr for DayBoundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(DayBoundary::Local),
            "utc" => Ok(DayBoundary::Utc),
            other => Err(format!("unknown day boundary '{}'", other)),
        }
    }
}

/// Wall-clock date source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDate {
    boundary: DayBoundary,
}

impl SystemDate {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl DateSource for SystemDate {
    fn today(&self) -> NaiveDate {
        match self.boundary {
            DayBoundary::Local => Local::now().date_naive(),
            DayBoundary::Utc => Utc::now().date_naive(),
        }
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a `YYYY-MM-DD` date, or the word `today`
pub fn parse_log_date(input: &str, source: &dyn DateSource) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(source.today());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}
