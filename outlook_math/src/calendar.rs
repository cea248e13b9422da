//! Business-day arithmetic
//!
//! A business day is Monday through Friday. Holiday calendars are not
//! considered.

use crate::{MathError, Result};
use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

/// Whether the timestamp falls on a weekday
pub fn is_business_day(timestamp: NaiveDateTime) -> bool {
    !matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day strictly after `timestamp`, keeping the time of day
pub fn next_business_day(timestamp: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut current = timestamp;
    loop {
        current = current
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| {
                MathError::CalculationError(format!("Date overflow after {}", timestamp))
            })?;
        if is_business_day(current) {
            return Ok(current);
        }
    }
}

/// `count` consecutive business days, the first one being the business day
/// after `timestamp`
pub fn business_days_after(timestamp: NaiveDateTime, count: usize) -> Result<Vec<NaiveDateTime>> {
    let mut days = Vec::with_capacity(count);
    let mut current = timestamp;

    for _ in 0..count {
        current = next_business_day(current)?;
        days.push(current);
    }

    Ok(days)
}
