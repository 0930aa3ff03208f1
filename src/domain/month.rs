//! `YYYY-MM` month keys identifying independent budgeting periods.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month key `{0}`, expected YYYY-MM")]
pub struct MonthKeyError(pub String);

/// A validated `YYYY-MM` key. Lexical order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    pub fn parse(raw: &str) -> Result<Self, MonthKeyError> {
        let trimmed = raw.trim();
        let bytes = trimmed.as_bytes();
        let shaped = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(idx, b)| idx == 4 || b.is_ascii_digit());
        if !shaped {
            return Err(MonthKeyError(raw.to_string()));
        }
        let month: u32 = trimmed[5..]
            .parse()
            .map_err(|_| MonthKeyError(raw.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Parses user input, falling back to the current month when it is blank.
    pub fn parse_or_current(raw: &str) -> Result<Self, MonthKeyError> {
        if raw.trim().is_empty() {
            Ok(Self::current())
        } else {
            Self::parse(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.0
    }
}
