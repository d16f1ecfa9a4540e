//! Deduction rule model.
//!
//! Deduction rules are withheld from gross pay, either as a flat amount or
//! as a percentage of gross pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// How a deduction amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// A flat currency amount withheld regardless of pay.
    Fixed,
    /// A percentage (0–100) of gross pay.
    Percentage,
}

/// Largest flat amount a fixed deduction rule may withhold.
pub const MAX_FIXED_DEDUCTION: i64 = 1_000_000_000_000;

/// A deduction rule attached to an employee.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::{DeductionKind, DeductionRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rule = DeductionRule {
///     id: "ded_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     name: "Pension".to_string(),
///     kind: DeductionKind::Percentage,
///     amount: Decimal::from_str("4.5").unwrap(),
///     is_active: true,
/// };
/// assert!(rule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// The employee the rule applies to.
    pub employee_id: String,
    /// Display name (e.g. "Income tax").
    pub name: String,
    /// Fixed amount or percentage of gross pay.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Currency amount for fixed rules, percent for percentage rules.
    pub amount: Decimal,
    /// Inactive rules contribute nothing.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl DeductionRule {
    /// Checks the rule the way the deduction form does before saving.
    ///
    /// The payroll aggregator trusts its input, so this must run at the
    /// boundary.
    pub fn validate(&self) -> PayrollResult<()> {
        validate_deduction(&self.name, self.kind, self.amount)
    }
}

/// Validates the user-editable parts of a deduction rule.
///
/// - `name` must not be blank
/// - `amount` must not be negative
/// - fixed amounts must not exceed [`MAX_FIXED_DEDUCTION`]
/// - percentage amounts must not exceed 100
pub fn validate_deduction(name: &str, kind: DeductionKind, amount: Decimal) -> PayrollResult<()> {
    if name.trim().is_empty() {
        return Err(PayrollError::InvalidDeduction {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PayrollError::InvalidDeduction {
            field: "amount".to_string(),
            message: format!("{} must not be negative", amount),
        });
    }

    if kind == DeductionKind::Fixed && amount > Decimal::from(MAX_FIXED_DEDUCTION) {
        return Err(PayrollError::InvalidDeduction {
            field: "amount".to_string(),
            message: format!("fixed amount {} exceeds {}", amount, MAX_FIXED_DEDUCTION),
        });
    }

    if kind == DeductionKind::Percentage && amount > Decimal::ONE_HUNDRED {
        return Err(PayrollError::InvalidDeduction {
            field: "amount".to_string(),
            message: format!("percentage {} cannot exceed 100", amount),
        });
    }

    Ok(())
}

/// A named deduction template offered when creating a new rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionPreset {
    /// Display name.
    pub name: String,
    /// Fixed amount or percentage of gross pay.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Suggested amount.
    pub amount: Decimal,
}
