//! Worked hours calculation.
//!
//! This module turns a clock-in/clock-out pair into worked time. Clock values
//! are times of day without a date, so a clock-out earlier than the clock-in
//! means the shift ran past midnight into the next day.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::models::WorkEntry;

/// Minutes in one day, added to the clock-out of a shift that crosses midnight.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Returns whole minutes worked between two clock values.
///
/// Returns 0 when either value is missing. When the clock-out is earlier than
/// the clock-in, one day is added to the clock-out. A duration that is still
/// not positive (identical clock values) counts as 0, never negative.
/// Seconds are ignored.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::worked_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
///
/// assert_eq!(worked_minutes(t(9, 0), t(18, 0)), 540);
/// assert_eq!(worked_minutes(t(22, 0), t(2, 0)), 240);
/// assert_eq!(worked_minutes(None, t(18, 0)), 0);
/// ```
pub fn worked_minutes(clock_in: Option<NaiveTime>, clock_out: Option<NaiveTime>) -> i64 {
    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return 0;
    };

    let in_minutes = minutes_since_midnight(clock_in);
    let mut out_minutes = minutes_since_midnight(clock_out);

    if out_minutes < in_minutes {
        out_minutes += MINUTES_PER_DAY;
    }

    (out_minutes - in_minutes).max(0)
}

/// Returns the minutes worked for a work entry; a day off is always 0.
pub fn entry_minutes(entry: &WorkEntry) -> i64 {
    match entry {
        WorkEntry::DayOff { .. } => 0,
        WorkEntry::Work {
            clock_in,
            clock_out,
        } => worked_minutes(*clock_in, *clock_out),
    }
}

/// Converts whole minutes into hours without rounding.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Computes the hours worked for a work entry.
///
/// The result is never negative and is not rounded: a 20 minute shift is
/// one third of an hour to full decimal precision. Rounding only happens
/// when hours are turned into money.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::compute_hours;
/// use worklog_payroll::models::WorkEntry;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(compute_hours(&WorkEntry::shift(t(9, 0), t(18, 0))), Decimal::from(9));
/// assert_eq!(compute_hours(&WorkEntry::shift(t(22, 0), t(2, 0))), Decimal::from(4));
/// assert_eq!(compute_hours(&WorkEntry::day_off()), Decimal::ZERO);
/// ```
pub fn compute_hours(entry: &WorkEntry) -> Decimal {
    minutes_to_hours(entry_minutes(entry))
}

/// Returns true when the clock-out hour is earlier than the clock-in hour.
///
/// Only the hour components are compared, so 22:30 → 22:10 is not a night
/// shift even though its hours wrap past midnight. Missing values yield
/// `false`. Used for display only; hour totals do not depend on it.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::is_night_shift;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
///
/// assert!(is_night_shift(t(22, 0), t(2, 0)));
/// assert!(!is_night_shift(t(9, 0), t(18, 0)));
/// ```
pub fn is_night_shift(clock_in: Option<NaiveTime>, clock_out: Option<NaiveTime>) -> bool {
    match (clock_in, clock_out) {
        (Some(clock_in), Some(clock_out)) => clock_out.hour() < clock_in.hour(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn work(clock_in: Option<NaiveTime>, clock_out: Option<NaiveTime>) -> WorkEntry {
        WorkEntry::Work {
            clock_in,
            clock_out,
        }
    }

    #[test]
    fn test_day_shift_nine_hours() {
        assert_eq!(compute_hours(&WorkEntry::shift(t(9, 0), t(18, 0))), dec("9"));
    }

    #[test]
    fn test_overnight_shift_wraps_midnight() {
        assert_eq!(compute_hours(&WorkEntry::shift(t(22, 0), t(2, 0))), dec("4"));
    }

    #[test]
    fn test_missing_clock_in_is_zero() {
        assert_eq!(compute_hours(&work(None, Some(t(18, 0)))), Decimal::ZERO);
    }

    #[test]
    fn test_missing_clock_out_is_zero() {
        assert_eq!(compute_hours(&work(Some(t(9, 0)), None)), Decimal::ZERO);
    }

    #[test]
    fn test_day_off_is_zero() {
        assert_eq!(compute_hours(&WorkEntry::day_off()), Decimal::ZERO);
    }

    #[test]
    fn test_identical_clock_values_are_zero() {
        assert_eq!(worked_minutes(Some(t(9, 0)), Some(t(9, 0))), 0);
    }

    #[test]
    fn test_partial_hours_keep_fraction() {
        assert_eq!(compute_hours(&WorkEntry::shift(t(9, 0), t(17, 30))), dec("8.5"));
        assert_eq!(compute_hours(&WorkEntry::shift(t(9, 0), t(9, 15))), dec("0.25"));
    }

    #[test]
    fn test_seconds_are_ignored() {
        let clock_in = NaiveTime::from_hms_opt(9, 0, 59).unwrap();
        let clock_out = NaiveTime::from_hms_opt(10, 0, 1).unwrap();
        assert_eq!(worked_minutes(Some(clock_in), Some(clock_out)), 60);
    }

    #[test]
    fn test_one_minute_before_clock_in_is_almost_a_day() {
        assert_eq!(worked_minutes(Some(t(9, 0)), Some(t(8, 59))), MINUTES_PER_DAY - 1);
    }

    #[test]
    fn test_night_shift_detection() {
        assert!(is_night_shift(Some(t(22, 0)), Some(t(2, 0))));
        assert!(!is_night_shift(Some(t(9, 0)), Some(t(18, 0))));
    }

    #[test]
    fn test_night_shift_compares_hours_only() {
        // Wraps midnight in minutes, but the hours are equal.
        assert!(!is_night_shift(Some(t(22, 30)), Some(t(22, 10))));
        assert_eq!(worked_minutes(Some(t(22, 30)), Some(t(22, 10))), 1420);
    }

    #[test]
    fn test_night_shift_missing_values_is_false() {
        assert!(!is_night_shift(None, Some(t(2, 0))));
        assert!(!is_night_shift(Some(t(22, 0)), None));
    }

    fn any_time() -> impl Strategy<Value = Option<NaiveTime>> {
        prop::option::of((0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| {
            NaiveTime::from_hms_opt(h, m, s).unwrap()
        }))
    }

    proptest! {
        #[test]
        fn prop_hours_are_never_negative(clock_in in any_time(), clock_out in any_time()) {
            let hours = compute_hours(&work(clock_in, clock_out));
            prop_assert!(hours >= Decimal::ZERO);
        }

        #[test]
        fn prop_shift_is_shorter_than_a_day(clock_in in any_time(), clock_out in any_time()) {
            let minutes = worked_minutes(clock_in, clock_out);
            prop_assert!((0..MINUTES_PER_DAY).contains(&minutes));
        }

        #[test]
        fn prop_same_inputs_same_hours(clock_in in any_time(), clock_out in any_time()) {
            let entry = work(clock_in, clock_out);
            prop_assert_eq!(compute_hours(&entry), compute_hours(&entry));
        }
    }
}
