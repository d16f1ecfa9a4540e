//! Payroll summary models.
//!
//! This module contains the [`PayrollSummary`] type produced by the payroll
//! aggregator and the [`PayrollReport`] envelope the API returns around it,
//! together with the per-record lines, deduction lines and audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DeductionKind, PayPeriod, RecordStatus};

/// The computed contribution of one deduction rule.
///
/// # Example
///
/// ```
/// use worklog_payroll::models::{DeductionKind, DeductionLine};
/// use rust_decimal::Decimal;
///
/// let line = DeductionLine {
///     deduction_id: "ded_001".to_string(),
///     name: "Income tax".to_string(),
///     kind: DeductionKind::Percentage,
///     rate: Decimal::from(3),
///     is_active: true,
///     amount: Decimal::from(2700),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The rule this line was computed from.
    pub deduction_id: String,
    /// The rule's display name.
    pub name: String,
    /// Fixed amount or percentage of gross pay.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// The rule's configured amount (currency or percent).
    pub rate: Decimal,
    /// Whether the rule was active.
    pub is_active: bool,
    /// The amount withheld (zero for inactive rules).
    pub amount: Decimal,
}

/// Hours and daily pay for one work record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLine {
    /// The record this line was computed from.
    pub record_id: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// The record's approval state.
    pub status: RecordStatus,
    /// Whether the record is a day off.
    pub day_off: bool,
    /// Whether the shift ended in an earlier clock hour than it started.
    pub night_shift: bool,
    /// Hours worked.
    pub hours: Decimal,
    /// `floor(hours * hourly_wage)`, shown whatever the status.
    pub daily_pay: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag records that were counted as zero hours but probably
/// should not have been.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for a payroll calculation.
///
/// Contains no timings or identifiers, so the same input always yields the
/// same trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Derived payroll totals for a set of work records.
///
/// Never persisted; recomputed from the current records and rules on every
/// call.
///
/// # Example
///
/// ```
/// use worklog_payroll::calculation::compute_payroll;
/// use rust_decimal::Decimal;
///
/// let summary = compute_payroll(&[], Decimal::from(10030), &[]);
/// assert_eq!(summary.total_hours, Decimal::ZERO);
/// assert_eq!(summary.net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Approved plus pending hours.
    pub total_hours: Decimal,
    /// Hours on approved records; the only paid hours.
    pub approved_hours: Decimal,
    /// Hours on records still awaiting approval.
    pub pending_hours: Decimal,
    /// The hourly wage the summary was computed with.
    pub hourly_wage: Decimal,
    /// `floor(approved_hours * hourly_wage)`.
    pub gross_pay: Decimal,
    /// Sum of all active deduction contributions.
    pub total_deductions: Decimal,
    /// `floor(gross_pay - total_deductions)`.
    pub net_pay: Decimal,
    /// One line per deduction rule, in input order.
    pub deductions: Vec<DeductionLine>,
    /// One line per work record, in input order.
    pub records: Vec<RecordLine>,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// A payroll summary wrapped with calculation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the report is for, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The pay period the records were selected from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<PayPeriod>,
    /// The computed totals.
    pub summary: PayrollSummary,
    /// The calculation duration in microseconds.
    pub duration_us: u64,
}

impl PayrollReport {
    /// Wraps a summary with a fresh calculation id and timestamp.
    pub fn new(
        summary: PayrollSummary,
        employee_id: Option<String>,
        pay_period: Option<PayPeriod>,
        duration_us: u64,
    ) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id,
            pay_period,
            summary,
            duration_us,
        }
    }
}
