//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: worked hours from
//! clock values (including shifts that cross midnight), night shift
//! classification, deduction amounts, and the payroll aggregator that turns
//! work records and deduction rules into gross and net pay.

mod deductions;
mod hours;
mod payroll;

pub use deductions::{DeductionResult, apply_deduction, deduction_amount};
pub use hours::{
    MINUTES_PER_DAY, compute_hours, entry_minutes, is_night_shift, minutes_to_hours,
    worked_minutes,
};
pub use payroll::{compute_payroll, daily_pay, pay_for_minutes};
