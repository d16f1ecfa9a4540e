//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that bounds which work
//! records are fetched for a payroll summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// An inclusive date range that payroll is computed over.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::for_month(2025, 2).unwrap();
///
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Builds the pay period covering one calendar month.
    ///
    /// Returns [`PayrollError::InvalidPayPeriod`] when `month` is not in
    /// 1..=12 or the year is out of range.
    pub fn for_month(year: i32, month: u32) -> PayrollResult<Self> {
        let invalid = || PayrollError::InvalidPayPeriod { year, month };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end_date = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
