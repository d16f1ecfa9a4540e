//! Work record model and related types.
//!
//! A work record is one employee's attendance entry for one calendar day:
//! either a worked shift with clock-in/clock-out times, or a day off.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Approval state of a work record.
///
/// Only approved records are paid; pending records are reported separately
/// and rejected records are ignored by the payroll totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Submitted by the employee, awaiting review.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Refused by an administrator.
    Rejected,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Reason stored for a day off when none was entered.
pub const DEFAULT_DAY_OFF_REASON: &str = "No reason given";

fn default_day_off_reason() -> String {
    DEFAULT_DAY_OFF_REASON.to_string()
}

/// What happened on the day a record covers.
///
/// Serialized with a `work_type` tag of `"work"` or `"day_off"`. A day off
/// carries a reason instead of clock values.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::WorkEntry;
/// use chrono::NaiveTime;
///
/// let entry = WorkEntry::shift(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
/// );
/// assert!(!entry.is_day_off());
/// assert!(WorkEntry::day_off().is_day_off());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "work_type", rename_all = "snake_case")]
pub enum WorkEntry {
    /// A worked shift. Either clock value may still be missing.
    Work {
        /// Time of day the employee clocked in.
        clock_in: Option<NaiveTime>,
        /// Time of day the employee clocked out.
        clock_out: Option<NaiveTime>,
    },
    /// A scheduled day off.
    DayOff {
        /// Why the employee was off.
        #[serde(default = "default_day_off_reason")]
        day_off_reason: String,
    },
}

impl WorkEntry {
    /// Creates a complete worked shift.
    pub fn shift(clock_in: NaiveTime, clock_out: NaiveTime) -> Self {
        WorkEntry::Work {
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
        }
    }

    /// Creates a day off with the default reason.
    pub fn day_off() -> Self {
        Self::day_off_with_reason("")
    }

    /// Creates a day off. A blank reason becomes [`DEFAULT_DAY_OFF_REASON`].
    pub fn day_off_with_reason(reason: &str) -> Self {
        let reason = reason.trim();
        WorkEntry::DayOff {
            day_off_reason: if reason.is_empty() {
                default_day_off_reason()
            } else {
                reason.to_string()
            },
        }
    }

    /// Builds an entry from the raw wire representation.
    ///
    /// `work_type` must be `"work"` or `"day_off"`. Clock values are parsed
    /// with [`parse_time_of_day`]; for a day off they are discarded without
    /// being parsed, and `day_off_reason` is kept instead.
    pub fn from_raw(
        work_type: &str,
        clock_in: Option<&str>,
        clock_out: Option<&str>,
        day_off_reason: Option<&str>,
    ) -> PayrollResult<Self> {
        match work_type {
            "day_off" => Ok(Self::day_off_with_reason(day_off_reason.unwrap_or_default())),
            "work" => Ok(WorkEntry::Work {
                clock_in: clock_in.map(parse_time_of_day).transpose()?,
                clock_out: clock_out.map(parse_time_of_day).transpose()?,
            }),
            other => Err(PayrollError::InvalidWorkType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns true for [`WorkEntry::DayOff`].
    pub fn is_day_off(&self) -> bool {
        matches!(self, WorkEntry::DayOff { .. })
    }

    /// Returns the clock-in/clock-out pair, or `(None, None)` for a day off.
    pub fn clock_times(&self) -> (Option<NaiveTime>, Option<NaiveTime>) {
        match self {
            WorkEntry::Work {
                clock_in,
                clock_out,
            } => (*clock_in, *clock_out),
            WorkEntry::DayOff { .. } => (None, None),
        }
    }

    /// Returns the reason for a day off, `None` for a worked shift.
    pub fn day_off_reason(&self) -> Option<&str> {
        match self {
            WorkEntry::DayOff { day_off_reason } => Some(day_off_reason),
            WorkEntry::Work { .. } => None,
        }
    }
}

/// Parses a time of day in `HH:MM` or `HH:MM:SS` form.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time_of_day("22:30").unwrap(), NaiveTime::from_hms_opt(22, 30, 0).unwrap());
/// assert_eq!(parse_time_of_day("07:05:00").unwrap(), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
/// assert!(parse_time_of_day("24:00").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> PayrollResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| PayrollError::InvalidTimeOfDay {
            value: value.to_string(),
        })
}

/// An attendance entry for one employee on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day the record covers (the day the shift started).
    pub date: NaiveDate,
    /// Worked shift or day off.
    #[serde(flatten)]
    pub entry: WorkEntry,
    /// Approval state.
    pub status: RecordStatus,
    /// Free-form notes entered with the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Keeps only records with the given status, or all records for `None`.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::{filter_by_status, RecordStatus, WorkEntry, WorkRecord};
/// use chrono::NaiveDate;
///
/// let record = |id: &str, status| WorkRecord {
///     id: id.to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     entry: WorkEntry::day_off(),
///     status,
///     notes: None,
/// };
/// let records = vec![record("a", RecordStatus::Pending), record("b", RecordStatus::Approved)];
///
/// assert_eq!(filter_by_status(&records, Some(RecordStatus::Approved)).len(), 1);
/// assert_eq!(filter_by_status(&records, None).len(), 2);
/// ```
pub fn filter_by_status(records: &[WorkRecord], status: Option<RecordStatus>) -> Vec<&WorkRecord> {
    records
        .iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .collect()
}
