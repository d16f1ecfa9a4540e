//! Deduction calculation.
//!
//! Computes how much each deduction rule withholds from gross pay. Fixed
//! rules withhold their amount as-is; percentage rules withhold
//! `floor(gross_pay * amount / 100)`. Inactive rules withhold nothing.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DeductionKind, DeductionLine, DeductionRule};

/// The result of applying one deduction rule.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The computed deduction line.
    pub line: DeductionLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the amount a single rule withholds from `gross_pay`.
///
/// The percentage is not clamped; rules are expected to have been
/// validated before they reach the calculator.
///
/// # Examples
///
/// ```
/// use worklog_payroll::calculation::deduction_amount;
/// use worklog_payroll::models::{DeductionKind, DeductionRule};
/// use rust_decimal::Decimal;
///
/// let rule = DeductionRule {
///     id: "ded_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     name: "Income tax".to_string(),
///     kind: DeductionKind::Percentage,
///     amount: Decimal::from(10),
///     is_active: true,
/// };
/// assert_eq!(deduction_amount(&rule, Decimal::from(90000)), Decimal::from(9000));
/// ```
pub fn deduction_amount(rule: &DeductionRule, gross_pay: Decimal) -> Decimal {
    if !rule.is_active {
        return Decimal::ZERO;
    }

    match rule.kind {
        DeductionKind::Fixed => rule.amount,
        DeductionKind::Percentage => (gross_pay * rule.amount / Decimal::ONE_HUNDRED).floor(),
    }
}

/// Applies a deduction rule and records an audit step for it.
///
/// # Arguments
///
/// * `rule` - The deduction rule to apply
/// * `gross_pay` - The gross pay the rule is applied against
/// * `step_number` - The step number for audit trail sequencing
pub fn apply_deduction(rule: &DeductionRule, gross_pay: Decimal, step_number: u32) -> DeductionResult {
    let amount = deduction_amount(rule, gross_pay);

    let reasoning = match (rule.is_active, rule.kind) {
        (false, _) => format!("'{}' is inactive and withholds nothing", rule.name),
        (true, DeductionKind::Fixed) => {
            format!("'{}' withholds a fixed {}", rule.name, amount.normalize())
        }
        (true, DeductionKind::Percentage) => format!(
            "'{}' withholds floor({} × {}%) = {}",
            rule.name,
            gross_pay.normalize(),
            rule.amount.normalize(),
            amount.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deduction".to_string(),
        rule_name: "Deduction Calculation".to_string(),
        input: serde_json::json!({
            "deduction_id": rule.id,
            "type": rule.kind,
            "amount": rule.amount.normalize().to_string(),
            "is_active": rule.is_active,
            "gross_pay": gross_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "withheld": amount.normalize().to_string()
        }),
        reasoning,
    };

    DeductionResult {
        line: DeductionLine {
            deduction_id: rule.id.clone(),
            name: rule.name.clone(),
            kind: rule.kind,
            rate: rule.amount,
            is_active: rule.is_active,
            amount,
        },
        audit_step,
    }
}
