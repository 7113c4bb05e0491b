//! Excel date/time serial numbers
//!
//! Excel stores dates as the number of days since an epoch plus the time of
//! day as a fraction. The 1900 system counts 1900-01-01 as day 1 and keeps
//! Lotus 1-2-3's phantom 1900-02-29 as day 60, so every date from 1900-03-01
//! onward is one larger than the true day count. The 1904 system counts
//! 1904-01-01 as day 0 and has no such quirk.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Error, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A date, a time of day, or both, convertible to an Excel serial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExcelDateTime {
    /// `None` for a time-only value, which serializes to a fraction below 1
    date: Option<NaiveDate>,
    time: NaiveTime,
}

impl ExcelDateTime {
    /// A calendar date at midnight
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::ParameterValidation(format!("invalid date {}-{}-{}", year, month, day))
        })?;
        Ok(Self {
            date: Some(date),
            time: NaiveTime::MIN,
        })
    }

    /// A time of day with no date part
    ///
    /// `seconds` may carry a fractional part down to nanoseconds.
    pub fn from_hms(hour: u32, minute: u32, seconds: f64) -> Result<Self> {
        Ok(Self {
            date: None,
            time: time_from_hms(hour, minute, seconds)?,
        })
    }

    /// Replace the time of day
    pub fn and_hms(self, hour: u32, minute: u32, seconds: f64) -> Result<Self> {
        Ok(Self {
            date: self.date,
            time: time_from_hms(hour, minute, seconds)?,
        })
    }

    /// The date part, if any
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The time-of-day part
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Convert to an Excel serial number
    ///
    /// Dates before the epoch of the selected system are rejected.
    pub fn to_serial(&self, date_1904: bool) -> Result<f64> {
        let time = self.time.num_seconds_from_midnight() as f64
            + self.time.nanosecond() as f64 / 1e9;
        let fraction = time / SECONDS_PER_DAY;

        let date = match self.date {
            Some(date) => date,
            None => return Ok(fraction),
        };

        let days = if date_1904 {
            let epoch = NaiveDate::from_ymd_opt(1904, 1, 1).unwrap_or(NaiveDate::MIN);
            (date - epoch).num_days()
        } else {
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(NaiveDate::MIN);
            let days = (date - epoch).num_days();
            // Lotus leap-year bug: 1900-02-29 is day 60
            if days > 59 {
                days + 1
            } else {
                days
            }
        };

        if days < 0 || (!date_1904 && days == 0) {
            return Err(Error::ParameterValidation(format!(
                "date {} is before the {} epoch",
                date,
                if date_1904 { 1904 } else { 1900 }
            )));
        }

        Ok(days as f64 + fraction)
    }
}

impl From<NaiveDateTime> for ExcelDateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            date: Some(value.date()),
            time: value.time(),
        }
    }
}

impl From<NaiveDate> for ExcelDateTime {
    fn from(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            time: NaiveTime::MIN,
        }
    }
}

impl From<NaiveTime> for ExcelDateTime {
    fn from(time: NaiveTime) -> Self {
        Self { date: None, time }
    }
}

fn time_from_hms(hour: u32, minute: u32, seconds: f64) -> Result<NaiveTime> {
    let invalid =
        || Error::ParameterValidation(format!("invalid time {}:{}:{}", hour, minute, seconds));

    if !seconds.is_finite() || !(0.0..60.0).contains(&seconds) {
        return Err(invalid());
    }
    let whole = seconds.trunc() as u32;
    let nanos = ((seconds - seconds.trunc()) * 1e9).round() as u32;
    NaiveTime::from_hms_nano_opt(hour, minute, whole, nanos.min(999_999_999)).ok_or_else(invalid)
}
