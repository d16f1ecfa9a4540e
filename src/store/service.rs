//! Monthly payroll orchestration.
//!
//! Fetches an employee's records and active deductions through the injected
//! repository and hands the snapshots to [`compute_payroll`].

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::compute_payroll;
use crate::error::PayrollResult;
use crate::models::{Employee, PayPeriod, PayrollSummary};

use super::repository::PayrollRepository;

/// A payroll summary for one employee and one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayroll {
    /// The employee the summary is for.
    pub employee: Employee,
    /// The month the records were selected from.
    pub pay_period: PayPeriod,
    /// The computed totals.
    pub summary: PayrollSummary,
}

/// Computes payroll summaries from stored records.
#[derive(Clone)]
pub struct PayrollService {
    repository: Arc<dyn PayrollRepository>,
    default_hourly_wage: Decimal,
}

impl PayrollService {
    /// Creates a service over `repository`.
    ///
    /// `default_hourly_wage` applies to employees without a wage of their own.
    pub fn new(repository: Arc<dyn PayrollRepository>, default_hourly_wage: Decimal) -> Self {
        Self {
            repository,
            default_hourly_wage,
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &Arc<dyn PayrollRepository> {
        &self.repository
    }

    /// Computes the payroll summary for one employee and month.
    ///
    /// Only active deduction rules are fetched. Errors if the month is
    /// invalid or the employee does not exist.
    pub async fn monthly_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> PayrollResult<MonthlyPayroll> {
        let pay_period = PayPeriod::for_month(year, month)?;
        let employee = self.repository.get_employee(employee_id).await?;
        let records = self
            .repository
            .list_work_records(employee_id, &pay_period)
            .await?;
        let deductions = self.repository.list_deductions(employee_id, true).await?;

        let hourly_wage = employee.effective_hourly_wage(self.default_hourly_wage);
        debug!(
            employee_id,
            records = records.len(),
            deductions = deductions.len(),
            hourly_wage = %hourly_wage,
            "Computing monthly payroll"
        );

        let summary = compute_payroll(&records, hourly_wage, &deductions);

        Ok(MonthlyPayroll {
            employee,
            pay_period,
            summary,
        })
    }
}
