use crate::error::{Result, WrappedError};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::BTreeSet;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    /// Author time in the author's own UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub path: String,
    pub added_lines: u32,
    pub deleted_lines: u32,
    pub is_binary: bool,
}

/// Trimmed author emails a commit must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSet(BTreeSet<String>);

impl AuthorSet {
    pub fn parse(input: &str) -> Result<Self> {
        let emails: BTreeSet<String> = input
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect();

        if emails.is_empty() {
            return Err(WrappedError::Config(
                "No valid author emails were provided".to_string(),
            ));
        }

        Ok(Self(emails))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromStr for AuthorSet {
    type Err = WrappedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Half-open `[start, end)` span covering one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Midnight Jan 1 of `year` up to midnight Jan 1 of `year + 1`, both in `tz`.
    pub fn for_year<Tz: TimeZone>(year: i32, tz: &Tz) -> Result<Self> {
        let start = start_of_year(year, tz)?;
        let end = start_of_year(year + 1, tz)?;
        Ok(Self { start, end })
    }

    pub fn local(year: i32) -> Result<Self> {
        Self::for_year(year, &chrono::Local)
    }

    pub fn contains<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> bool {
        let instant = timestamp.with_timezone(&Utc);
        self.start <= instant && instant < self.end
    }
}

fn start_of_year<Tz: TimeZone>(year: i32, tz: &Tz) -> Result<DateTime<Utc>> {
    tz.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| WrappedError::InvalidDate(format!("No midnight on Jan 1 of {year}")))
}
