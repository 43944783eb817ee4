use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone as _, Utc};

use crate::errors::DashboardError;

/// Calendar month selector. Parsed from an English month name
/// (`"March"`, `"mar"`) or a month number (`"3"`, `"03"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Month(chrono::Month);

impl Month {
    pub fn number(&self) -> u32 {
        self.0.number_from_month()
    }

    /// Half-open window `[first instant of month, first instant of next month)`
    /// in UTC for the given year.
    pub fn window(&self, year: i32) -> Result<DateWindow, DashboardError> {
        let start = first_instant(year, self.number())?;
        let end = match self.0 {
            chrono::Month::December => first_instant(year + 1, 1)?,
            _ => first_instant(year, self.number() + 1)?,
        };
        Ok(DateWindow { start, end })
    }
}

fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>, DashboardError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date_time| Utc.from_utc_datetime(&date_time))
        .ok_or_else(|| DashboardError::invalid(format!("Invalid date: {}-{:02}", year, month)))
}

impl FromStr for Month {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DashboardError::invalid("Month query parameter is required"));
        }
        let invalid = || DashboardError::invalid(format!("Invalid month: {}", s));

        if s.bytes().all(|b| b.is_ascii_digit()) {
            let number = s.parse::<u8>().map_err(|_| invalid())?;
            return chrono::Month::try_from(number)
                .map(Month)
                .map_err(|_| invalid());
        }
        s.parse::<chrono::Month>().map(Month).map_err(|_| invalid())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}
