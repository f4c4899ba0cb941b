//! Label text for the time and date.
//!
//! Formatting is done into fixed-capacity `heapless` strings so it runs the
//! same on the host and on a `no_std` target.

use core::fmt::Write;

use heapless::String;
use time::{Month, PrimitiveDateTime};

use crate::config::{LABEL_LEN, STEPS_PLACEHOLDER};

/// Text shown by the three labels. Regenerated wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// "HH:MM", 24-hour clock.
    pub time: String<LABEL_LEN>,
    /// "DD MON", upper case.
    pub date: String<LABEL_LEN>,
    /// "<N>K" or "?".
    pub steps: String<LABEL_LEN>,
}

impl DisplayState {
    pub fn new() -> Self {
        let mut steps = String::new();
        steps.push_str(STEPS_PLACEHOLDER).ok();
        Self {
            time: String::new(),
            date: String::new(),
            steps,
        }
    }

    /// Regenerate the time and date labels from the local wall clock.
    pub fn set_clock(
        &mut self,
        now: &PrimitiveDateTime,
    ) {
        self.time = format_time(now);
        self.date = format_date(now);
    }
}

impl Default for DisplayState {
    fn default() -> Self { Self::new() }
}

/// "HH:MM" in 24-hour format.
pub fn format_time(now: &PrimitiveDateTime) -> String<LABEL_LEN> {
    let mut out = String::new();
    write!(out, "{:02}:{:02}", now.hour(), now.minute()).ok();
    out
}

/// Zero-padded day and upper-case month abbreviation, e.g. "05 MAR".
pub fn format_date(now: &PrimitiveDateTime) -> String<LABEL_LEN> {
    let mut out = String::new();
    write!(out, "{:02} {}", now.day(), month_abbrev(now.month())).ok();
    out
}

/// Three-letter upper-case month name.
pub const fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "JAN",
        Month::February => "FEB",
        Month::March => "MAR",
        Month::April => "APR",
        Month::May => "MAY",
        Month::June => "JUN",
        Month::July => "JUL",
        Month::August => "AUG",
        Month::September => "SEP",
        Month::October => "OCT",
        Month::November => "NOV",
        Month::December => "DEC",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use time::{Date, Time};

    use super::*;

    fn at(
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> PrimitiveDateTime {
        PrimitiveDateTime::new(
            Date::from_calendar_date(year, month, day).unwrap(),
            Time::from_hms(hour, minute, 0).unwrap(),
        )
    }

    #[test]
    fn test_time_is_zero_padded_24h() {
        assert_eq!(format_time(&at(2024, Month::March, 5, 7, 3)), "07:03");
        assert_eq!(format_time(&at(2024, Month::March, 5, 23, 59)), "23:59");
        assert_eq!(format_time(&at(2024, Month::March, 5, 0, 0)), "00:00");
    }

    #[test]
    fn test_date_is_upper_case() {
        assert_eq!(format_date(&at(2024, Month::March, 5, 7, 3)), "05 MAR");
        assert_eq!(format_date(&at(2026, Month::October, 19, 12, 0)), "19 OCT");
        assert_eq!(format_date(&at(2025, Month::December, 31, 12, 0)), "31 DEC");
    }

    #[test]
    fn test_every_month_has_three_letters() {
        let mut month = Month::January;
        for _ in 0..12 {
            let abbrev = month_abbrev(month);
            assert_eq!(abbrev.len(), 3);
            assert!(abbrev.chars().all(|c| c.is_ascii_uppercase()));
            month = month.next();
        }
    }

    #[test]
    fn test_new_state_shows_steps_placeholder() {
        let state = DisplayState::new();
        assert_eq!(state.steps, "?");
        assert!(state.time.is_empty());
        assert!(state.date.is_empty());
    }

    #[test]
    fn test_set_clock_replaces_both_labels() {
        let mut state = DisplayState::new();
        state.set_clock(&at(2024, Month::March, 5, 7, 3));
        state.set_clock(&at(2024, Month::April, 12, 18, 45));
        assert_eq!(state.time, "18:45");
        assert_eq!(state.date, "12 APR");
    }
}
