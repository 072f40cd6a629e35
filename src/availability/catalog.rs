//! The canonical slot catalog and lead-time rule.
//!
//! Every date offers the same six 4-hour windows, starting at 10:00 AM and
//! every two hours after that. The last window runs until midnight.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A booking date must be strictly after `today + MIN_LEAD_DAYS`
pub const MIN_LEAD_DAYS: u64 = 7;

/// Length of every rental window
pub const SLOT_DURATION_HOURS: u32 = 4;

/// Start hour (24h clock) of each window, in display order
pub const SLOT_START_HOURS: [u32; 6] = [10, 12, 14, 16, 18, 20];

/// A rental window on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

impl TimeSlot {
    /// Build the catalog slot at `index` with the given availability
    pub fn from_catalog(index: usize, start_hour: u32, available: bool) -> Self {
        Self {
            id: slot_id(index),
            start_time: format_hour(start_hour),
            end_time: format_hour(start_hour + SLOT_DURATION_HOURS),
            available,
        }
    }

    /// Display label, e.g. "2:00 PM - 6:00 PM"
    pub fn label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Stable identifier of the catalog slot at `index`
pub fn slot_id(index: usize) -> String {
    format!("slot-{}", index)
}

/// Format a whole hour as "h:mm AM/PM". Hours past 23 wrap to the next day.
///
/// # Examples
/// ```
/// use openair_booth_web::availability::catalog::format_hour;
///
/// assert_eq!(format_hour(10), "10:00 AM");
/// assert_eq!(format_hour(12), "12:00 PM");
/// assert_eq!(format_hour(24), "12:00 AM");
/// ```
pub fn format_hour(hour: u32) -> String {
    let hour = hour % 24;
    let period = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, period)
}

/// Whether `date` satisfies the lead-time rule relative to `today`
pub fn is_lead_time_valid(date: NaiveDate, today: NaiveDate) -> bool {
    today
        .checked_add_days(Days::new(MIN_LEAD_DAYS))
        .map_or(false, |min_date| date > min_date)
}

/// First date that passes the lead-time rule
pub fn earliest_bookable_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(MIN_LEAD_DAYS + 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Check a picked date against the lead-time rule
pub fn check_lead_time(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if is_lead_time_valid(date, today) {
        Ok(date)
    } else {
        Err(ValidationError::LeadTime {
            date,
            earliest: earliest_bookable_date(today),
        })
    }
}

/// Parse a typed `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field: "date" });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_catalog_windows() {
        let slots: Vec<TimeSlot> = SLOT_START_HOURS
            .iter()
            .enumerate()
            .map(|(i, h)| TimeSlot::from_catalog(i, *h, true))
            .collect();

        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].id, "slot-0");
        assert_eq!(slots[0].label(), "10:00 AM - 2:00 PM");
        assert_eq!(slots[1].label(), "12:00 PM - 4:00 PM");
        assert_eq!(slots[5].label(), "8:00 PM - 12:00 AM");
    }

    #[test]
    fn test_lead_time_is_strict() {
        let today = date(2026, 10, 16);
        assert!(!is_lead_time_valid(today, today));
        assert!(!is_lead_time_valid(date(2026, 10, 23), today)); // exactly today + 7
        assert!(is_lead_time_valid(date(2026, 10, 24), today));
        assert_eq!(earliest_bookable_date(today), date(2026, 10, 24));
    }

    #[test]
    fn test_check_lead_time_reports_earliest() {
        let today = date(2026, 10, 16);
        let err = check_lead_time(date(2026, 10, 20), today).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LeadTime {
                date: date(2026, 10, 20),
                earliest: date(2026, 10, 24),
            }
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-11-01").unwrap(), date(2026, 11, 1));
        assert_eq!(parse_date(" 2026-11-01 ").unwrap(), date(2026, 11, 1));
        assert!(matches!(parse_date(""), Err(ValidationError::MissingField { field: "date" })));
        assert!(matches!(parse_date("11/01/2026"), Err(ValidationError::InvalidDate(_))));
    }
}
