//! Payroll aggregation.
//!
//! Turns a set of work records, an hourly wage and a set of deduction rules
//! into a [`PayrollSummary`]. Only approved hours are paid. Every money
//! amount is floored to a whole currency unit; rounding never goes up.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionRule, PayrollSummary, RecordLine, RecordStatus,
    WorkEntry, WorkRecord,
};

use super::deductions::apply_deduction;
use super::hours::{entry_minutes, is_night_shift, minutes_to_hours};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Returns `floor(minutes / 60 * hourly_wage)`.
///
/// Works on whole minutes so the result is exact: floor is applied to the
/// true product, not to a rounded hour figure.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::pay_for_minutes;
/// use rust_decimal::Decimal;
///
/// // 9 hours at 10,000 per hour
/// assert_eq!(pay_for_minutes(540, Decimal::from(10000)), Decimal::from(90000));
/// // 20 minutes at 10,030 per hour is 3343.33..., floored
/// assert_eq!(pay_for_minutes(20, Decimal::from(10030)), Decimal::from(3343));
/// ```
pub fn pay_for_minutes(minutes: i64, hourly_wage: Decimal) -> Decimal {
    (Decimal::from(minutes) * hourly_wage / MINUTES_PER_HOUR).floor()
}

/// Computes the pay for a single record at the given wage, whatever its status.
pub fn daily_pay(record: &WorkRecord, hourly_wage: Decimal) -> Decimal {
    pay_for_minutes(entry_minutes(&record.entry), hourly_wage)
}

/// Computes the payroll summary for a set of work records.
///
/// # Algorithm
///
/// 1. Hours of approved records form `approved_hours`, hours of pending
///    records form `pending_hours`; rejected records are ignored.
///    `total_hours` is their sum.
/// 2. `gross_pay = floor(approved_hours * hourly_wage)`.
/// 3. Each active deduction withholds its fixed amount, or
///    `floor(gross_pay * amount / 100)` for percentages.
/// 4. `net_pay = floor(gross_pay - total_deductions)`. Net pay is not
///    clamped and goes negative when deductions exceed gross pay.
///
/// The function is pure: the same input always produces the same summary.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::compute_payroll;
/// use worklog_payroll::models::{RecordStatus, WorkEntry, WorkRecord};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let record = WorkRecord {
///     id: "wr_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     entry: WorkEntry::shift(
///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     ),
///     status: RecordStatus::Approved,
///     notes: None,
/// };
///
/// let summary = compute_payroll(&[record], Decimal::from(10000), &[]);
/// assert_eq!(summary.gross_pay, Decimal::from(90000));
/// assert_eq!(summary.net_pay, Decimal::from(90000));
/// ```
pub fn compute_payroll(
    records: &[WorkRecord],
    hourly_wage: Decimal,
    deductions: &[DeductionRule],
) -> PayrollSummary {
    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: per-record hours, partitioned by status
    let mut approved_minutes: i64 = 0;
    let mut pending_minutes: i64 = 0;
    let mut record_lines = Vec::with_capacity(records.len());

    for record in records {
        let minutes = entry_minutes(&record.entry);
        match record.status {
            RecordStatus::Approved => approved_minutes += minutes,
            RecordStatus::Pending => pending_minutes += minutes,
            RecordStatus::Rejected => {}
        }

        if record.status != RecordStatus::Rejected {
            if let Some(warning) = check_entry(record) {
                warnings.push(warning);
            }
        }

        let (clock_in, clock_out) = record.entry.clock_times();
        record_lines.push(RecordLine {
            record_id: record.id.clone(),
            date: record.date,
            status: record.status,
            day_off: record.entry.is_day_off(),
            night_shift: is_night_shift(clock_in, clock_out),
            hours: minutes_to_hours(minutes),
            daily_pay: pay_for_minutes(minutes, hourly_wage),
        });
    }

    let approved_hours = minutes_to_hours(approved_minutes);
    let pending_hours = minutes_to_hours(pending_minutes);
    let total_hours = minutes_to_hours(approved_minutes + pending_minutes);

    let count = |status: RecordStatus| records.iter().filter(|r| r.status == status).count();
    steps.push(AuditStep {
        step_number,
        rule_id: "hours_aggregation".to_string(),
        rule_name: "Hours Aggregation".to_string(),
        input: serde_json::json!({
            "approved_records": count(RecordStatus::Approved),
            "pending_records": count(RecordStatus::Pending),
            "rejected_records": count(RecordStatus::Rejected)
        }),
        output: serde_json::json!({
            "approved_hours": approved_hours.normalize().to_string(),
            "pending_hours": pending_hours.normalize().to_string(),
            "total_hours": total_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} approved + {} pending minutes; rejected records are not counted",
            approved_minutes, pending_minutes
        ),
    });
    step_number += 1;

    // Step 2: gross pay from approved hours only
    let gross_pay = pay_for_minutes(approved_minutes, hourly_wage);
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay Calculation".to_string(),
        input: serde_json::json!({
            "approved_hours": approved_hours.normalize().to_string(),
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "floor({}h × {}) = {}",
            approved_hours.round_dp(4).normalize(),
            hourly_wage.normalize(),
            gross_pay.normalize()
        ),
    });
    step_number += 1;

    // Step 3: deductions
    let mut deduction_lines = Vec::with_capacity(deductions.len());
    let mut total_deductions = Decimal::ZERO;
    for rule in deductions {
        let result = apply_deduction(rule, gross_pay, step_number);
        total_deductions += result.line.amount;
        deduction_lines.push(result.line);
        steps.push(result.audit_step);
        step_number += 1;
    }

    // Step 4: net pay
    let net_pay = (gross_pay - total_deductions).floor();
    steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay Calculation".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "floor({} - {}) = {}",
            gross_pay.normalize(),
            total_deductions.normalize(),
            net_pay.normalize()
        ),
    });

    if net_pay.is_sign_negative() && !net_pay.is_zero() {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of {} exceed gross pay of {}",
                total_deductions.normalize(),
                gross_pay.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    PayrollSummary {
        total_hours,
        approved_hours,
        pending_hours,
        hourly_wage,
        gross_pay,
        total_deductions,
        net_pay,
        deductions: deduction_lines,
        records: record_lines,
        audit_trace: AuditTrace { steps, warnings },
    }
}

/// Flags work entries that count as zero hours but look like shifts.
fn check_entry(record: &WorkRecord) -> Option<AuditWarning> {
    let WorkEntry::Work {
        clock_in,
        clock_out,
    } = &record.entry
    else {
        return None;
    };

    match (*clock_in, *clock_out) {
        (Some(clock_in), Some(clock_out)) if entry_minutes(&record.entry) == 0 => {
            Some(AuditWarning {
                code: "ZERO_LENGTH_SHIFT".to_string(),
                message: format!(
                    "Record '{}' on {} clocks in and out at {}; counted as 0 hours",
                    record.id,
                    record.date,
                    clock_in.format("%H:%M")
                ),
                severity: if clock_in == clock_out { "medium" } else { "low" }.to_string(),
            })
        }
        (Some(_), Some(_)) => None,
        _ => Some(AuditWarning {
            code: "INCOMPLETE_SHIFT".to_string(),
            message: format!(
                "Record '{}' on {} is missing a clock-in or clock-out; counted as 0 hours",
                record.id, record.date
            ),
            severity: "low".to_string(),
        }),
    }
}
