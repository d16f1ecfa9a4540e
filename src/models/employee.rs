//! Employee model.
//!
//! This module defines the Employee struct for representing hourly
//! workers whose attendance is tracked.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Largest hourly wage accepted anywhere a wage enters the system.
pub const MAX_HOURLY_WAGE: i64 = 100_000_000;

/// Checks that a wage is within `0..=MAX_HOURLY_WAGE`.
///
/// Bounding the wage keeps every pay product inside `Decimal` range.
pub fn validate_hourly_wage(wage: Decimal) -> PayrollResult<()> {
    if (wage.is_sign_negative() && !wage.is_zero()) || wage > Decimal::from(MAX_HOURLY_WAGE) {
        return Err(PayrollError::InvalidWage { wage });
    }
    Ok(())
}

/// Represents an hourly employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
    /// The employee's own hourly wage, if one has been set.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
}

impl Employee {
    /// Returns the employee's hourly wage, falling back to `default_wage`.
    ///
    /// # Examples
    ///
    /// ```
    /// use worklog_payroll::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Kim".to_string(),
    ///     email: "kim@example.com".to_string(),
    ///     hourly_wage: None,
    /// };
    /// assert_eq!(employee.effective_hourly_wage(Decimal::from(10030)), Decimal::from(10030));
    /// ```
    pub fn effective_hourly_wage(&self, default_wage: Decimal) -> Decimal {
        // An unset or zero wage falls back to the default.
        match self.hourly_wage {
            Some(wage) if !wage.is_zero() => wage,
            _ => default_wage,
        }
    }
}
