//! The `M/D/YYYY` date form used by forecast storage.
//!
//! Stored records carry their date as a string with no zero padding
//! (`6/1/2020`). Lookups by location and date compare these strings exactly,
//! so every writer must produce them through [`to_month_day_year`].

use chrono::{Datelike, NaiveDate};

use stratus_core::{DomainError, DomainResult};

pub fn to_month_day_year(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

pub fn parse_month_day_year(s: &str) -> DomainResult<NaiveDate> {
    let invalid = || DomainError::validation(format!("'{s}' is not a month/day/year date"));

    let mut parts = s.trim().split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
