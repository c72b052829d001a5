//! Module handling the date given to the magnetic field query
//!
//! The remote models only care about the day, so everything is reduced to a `NaiveDate`.
//!

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("bad date: {0}")]
    BadDate(String),
}

/// Today, in UTC.
///
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a date given on the command-line.
///
/// `YYYY-MM-DD` is tried first, then anything `dateparser` understands, interpreted as UTC so
/// that the day does not shift with the local timezone.
///
#[tracing::instrument]
pub fn parse_date(date: &str) -> Result<NaiveDate, DateError> {
    let date = date.trim();
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        trace!("iso date {d}");
        return Ok(d);
    }
    match dateparser::parse_with_timezone(date, &Utc) {
        Ok(d) => {
            trace!("dateparser gave {d}");
            NaiveDate::from_ymd_opt(d.year(), d.month(), d.day())
                .ok_or_else(|| DateError::BadDate(date.to_string()))
        }
        Err(_) => Err(DateError::BadDate(date.to_string())),
    }
}

/// Either parse the given date or use today.
///
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate, DateError> {
    match date {
        Some(date) => parse_date(date),
        None => Ok(today()),
    }
}
