//! Request types for the payroll API.
//!
//! Clock values and work types arrive as raw strings and are validated here,
//! before anything reaches the calculation functions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::{
    DeductionKind, DeductionRule, Employee, MIN_PRIORITY, RecordStatus, WorkEntry, WorkRecord,
    validate_hourly_wage,
};
use crate::store::{AnnouncementDraft, DeductionDraft, NewWorkRecord, WorkRecordUpdate};

fn default_work_type() -> String {
    "work".to_string()
}

fn default_active() -> bool {
    true
}

/// Request body for the `/calculate` endpoint.
///
/// Carries a complete snapshot of records, wage and deduction rules; nothing
/// is read from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Optional employee id echoed back in the report.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Hourly wage; the configured default is used when absent.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
    /// The work records to aggregate.
    #[serde(default)]
    pub records: Vec<WorkRecordRequest>,
    /// The deduction rules to apply.
    #[serde(default)]
    pub deductions: Vec<DeductionRequest>,
}

/// Work record information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRecordRequest {
    /// Record id; generated from the position when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// `"work"` or `"day_off"`.
    #[serde(default = "default_work_type")]
    pub work_type: String,
    /// Clock-in as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Why the day was taken off; ignored for worked days.
    #[serde(default)]
    pub day_off_reason: Option<String>,
    /// Review status.
    pub status: RecordStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Deduction rule information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Rule id; generated from the position when absent in `/calculate`,
    /// selects the rule to update when saving.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Fixed amount or percentage.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Currency amount or percent.
    pub amount: Decimal,
    /// Whether the rule is applied.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request body for the `/hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// Clock-in as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// `"work"` or `"day_off"`.
    #[serde(default = "default_work_type")]
    pub work_type: String,
}

/// Request body for registering a work record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkRecordRequest {
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// `"work"` or `"day_off"`.
    #[serde(default = "default_work_type")]
    pub work_type: String,
    /// Clock-in as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Why the day was taken off; ignored for worked days.
    #[serde(default)]
    pub day_off_reason: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for editing a stored work record.
///
/// Same shape as [`NewWorkRecordRequest`], plus an optional status so a
/// manager can approve while correcting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkRecordRequest {
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// `"work"` or `"day_off"`.
    #[serde(default = "default_work_type")]
    pub work_type: String,
    /// Clock-in as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Why the day was taken off; ignored for worked days.
    #[serde(default)]
    pub day_off_reason: Option<String>,
    /// New review status; unchanged when absent.
    #[serde(default)]
    pub status: Option<RecordStatus>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for creating a deduction rule from a configured preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetRequest {
    /// Preset name, matched case-insensitively.
    pub preset: String,
}

fn default_priority() -> u8 {
    MIN_PRIORITY
}

/// Request body for creating or editing an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// The manager posting it.
    #[serde(default)]
    pub author_id: Option<String>,
    /// 1 (normal), 2 (important) or 3 (urgent).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Whether the banner shows it.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl AnnouncementRequest {
    /// Turns the request into a draft; the repository validates it.
    pub fn into_draft(self) -> AnnouncementDraft {
        AnnouncementDraft {
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            priority: self.priority,
            is_active: self.is_active,
        }
    }
}

/// Request body for registering or updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Hourly wage; the configured default applies when absent or zero.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
}

impl EmployeeRequest {
    /// Builds the employee stored under `id`.
    pub fn into_employee(self, id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: self.name,
            email: self.email,
            hourly_wage: self.hourly_wage,
        }
    }
}

/// Request body for changing a record's review status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    /// The new status.
    pub status: RecordStatus,
}

/// Request body for turning a deduction rule or announcement on or off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRequest {
    /// The new active flag.
    pub is_active: bool,
}

/// Query string selecting a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Restricts listed records to one status.
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

// Blank strings are treated like missing values.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn entry_from_raw(
    work_type: &str,
    clock_in: &Option<String>,
    clock_out: &Option<String>,
    day_off_reason: &Option<String>,
) -> PayrollResult<WorkEntry> {
    WorkEntry::from_raw(
        work_type,
        non_blank(clock_in),
        non_blank(clock_out),
        day_off_reason.as_deref(),
    )
}

impl CalculationRequest {
    /// Validates the request and converts it into domain types.
    ///
    /// Returns the hourly wage (if given), the work records and the deduction
    /// rules, or the first validation error.
    pub fn into_domain(
        self,
    ) -> PayrollResult<(Option<Decimal>, Vec<WorkRecord>, Vec<DeductionRule>)> {
        if let Some(wage) = self.hourly_wage {
            validate_hourly_wage(wage)?;
        }

        let employee_id = self.employee_id.unwrap_or_default();

        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(WorkRecord {
                    id: r.id.clone().unwrap_or_else(|| format!("record_{}", i + 1)),
                    employee_id: employee_id.clone(),
                    date: r.date,
                    entry: entry_from_raw(
                        &r.work_type,
                        &r.clock_in,
                        &r.clock_out,
                        &r.day_off_reason,
                    )?,
                    status: r.status,
                    notes: r.notes,
                })
            })
            .collect::<PayrollResult<Vec<_>>>()?;

        let deductions = self
            .deductions
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let rule = DeductionRule {
                    id: d.id.unwrap_or_else(|| format!("deduction_{}", i + 1)),
                    employee_id: employee_id.clone(),
                    name: d.name,
                    kind: d.kind,
                    amount: d.amount,
                    is_active: d.is_active,
                };
                rule.validate()?;
                Ok(rule)
            })
            .collect::<PayrollResult<Vec<_>>>()?;

        Ok((self.hourly_wage, records, deductions))
    }
}

impl HoursRequest {
    /// Validates the clock values and work type.
    pub fn to_entry(&self) -> PayrollResult<WorkEntry> {
        entry_from_raw(&self.work_type, &self.clock_in, &self.clock_out, &None)
    }
}

impl NewWorkRecordRequest {
    /// Validates the request into a record for `employee_id`.
    pub fn into_new_record(self, employee_id: &str) -> PayrollResult<NewWorkRecord> {
        let entry = entry_from_raw(
            &self.work_type,
            &self.clock_in,
            &self.clock_out,
            &self.day_off_reason,
        )?;
        Ok(NewWorkRecord {
            employee_id: employee_id.to_string(),
            date: self.date,
            entry,
            notes: self.notes,
        })
    }
}

impl UpdateWorkRecordRequest {
    /// Validates the request into an update of a stored record.
    pub fn into_update(self) -> PayrollResult<WorkRecordUpdate> {
        let entry = entry_from_raw(
            &self.work_type,
            &self.clock_in,
            &self.clock_out,
            &self.day_off_reason,
        )?;
        Ok(WorkRecordUpdate {
            date: self.date,
            entry,
            status: self.status,
            notes: self.notes,
        })
    }
}

impl DeductionRequest {
    /// Turns the request into a draft for `employee_id`.
    ///
    /// Validation happens when the repository saves the draft.
    pub fn into_draft(self, employee_id: &str) -> DeductionDraft {
        DeductionDraft {
            id: self.id,
            employee_id: employee_id.to_string(),
            name: self.name,
            kind: self.kind,
            amount: self.amount,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;
    use crate::models::DEFAULT_DAY_OFF_REASON;
    use chrono::NaiveTime;

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "employee_id": "emp_001",
            "hourly_wage": "10000",
            "records": [
                {
                    "date": "2025-03-03",
                    "work_type": "work",
                    "clock_in": "09:00",
                    "clock_out": "18:00:00",
                    "status": "approved"
                },
                {
                    "date": "2025-03-04",
                    "work_type": "day_off",
                    "status": "pending"
                }
            ],
            "deductions": [
                { "name": "Meals", "type": "fixed", "amount": "5000" }
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let (wage, records, deductions) = request.into_domain().unwrap();

        assert_eq!(wage, Some(Decimal::from(10000)));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "record_1");
        assert_eq!(records[0].employee_id, "emp_001");
        assert_eq!(
            records[0].entry,
            WorkEntry::shift(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap()
            )
        );
        assert_eq!(records[1].entry, WorkEntry::day_off());
        assert_eq!(deductions[0].id, "deduction_1");
        assert!(deductions[0].is_active);
    }

    #[test]
    fn test_work_type_defaults_to_work() {
        let json = r#"{ "date": "2025-03-03", "clock_in": "22:00", "clock_out": "02:00", "status": "pending" }"#;
        let record: WorkRecordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(record.work_type, "work");
    }

    #[test]
    fn test_bad_clock_value_is_rejected() {
        let request = CalculationRequest {
            employee_id: None,
            hourly_wage: None,
            records: vec![WorkRecordRequest {
                id: None,
                date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                work_type: "work".to_string(),
                clock_in: Some("9am".to_string()),
                clock_out: Some("18:00".to_string()),
                day_off_reason: None,
                status: RecordStatus::Approved,
                notes: None,
            }],
            deductions: vec![],
        };

        assert!(matches!(
            request.into_domain(),
            Err(PayrollError::InvalidTimeOfDay { .. })
        ));
    }

    #[test]
    fn test_blank_clock_value_is_missing() {
        let request = HoursRequest {
            clock_in: Some("".to_string()),
            clock_out: Some("18:00".to_string()),
            work_type: "work".to_string(),
        };
        let entry = request.to_entry().unwrap();
        assert_eq!(entry.clock_times().0, None);
    }

    #[test]
    fn test_invalid_percentage_is_rejected() {
        let request = CalculationRequest {
            employee_id: None,
            hourly_wage: None,
            records: vec![],
            deductions: vec![DeductionRequest {
                id: None,
                name: "Tax".to_string(),
                kind: DeductionKind::Percentage,
                amount: Decimal::from(120),
                is_active: true,
            }],
        };

        assert!(matches!(
            request.into_domain(),
            Err(PayrollError::InvalidDeduction { .. })
        ));
    }

    #[test]
    fn test_negative_wage_is_rejected() {
        let request = CalculationRequest {
            employee_id: None,
            hourly_wage: Some(Decimal::from(-1)),
            records: vec![],
            deductions: vec![],
        };

        assert!(matches!(
            request.into_domain(),
            Err(PayrollError::InvalidWage { .. })
        ));
    }

    #[test]
    fn test_new_work_record_request_for_employee() {
        let json = r#"{ "date": "2025-03-03", "work_type": "day_off" }"#;
        let request: NewWorkRecordRequest = serde_json::from_str(json).unwrap();
        let record = request.into_new_record("emp_007").unwrap();

        assert_eq!(record.employee_id, "emp_007");
        assert_eq!(record.entry, WorkEntry::day_off());
    }

    #[test]
    fn test_wage_above_maximum_is_rejected() {
        let json = r#"{ "hourly_wage": "79228162514264337593543950335", "records": [] }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(
            request.into_domain(),
            Err(PayrollError::InvalidWage { .. })
        ));
    }

    #[test]
    fn test_fixed_deduction_above_maximum_is_rejected() {
        let request = CalculationRequest {
            employee_id: None,
            hourly_wage: None,
            records: vec![],
            deductions: vec![DeductionRequest {
                id: None,
                name: "Rent".to_string(),
                kind: DeductionKind::Fixed,
                amount: Decimal::MAX,
                is_active: true,
            }],
        };

        assert!(matches!(
            request.into_domain(),
            Err(PayrollError::InvalidDeduction { .. })
        ));
    }

    #[test]
    fn test_day_off_reason_is_kept_or_defaulted() {
        let json = r#"{ "date": "2025-03-03", "work_type": "day_off", "day_off_reason": " Sick " }"#;
        let request: NewWorkRecordRequest = serde_json::from_str(json).unwrap();
        let record = request.into_new_record("emp_007").unwrap();
        assert_eq!(record.entry.day_off_reason(), Some("Sick"));

        let json = r#"{ "date": "2025-03-03", "work_type": "day_off", "day_off_reason": "  " }"#;
        let request: NewWorkRecordRequest = serde_json::from_str(json).unwrap();
        let record = request.into_new_record("emp_007").unwrap();
        assert_eq!(record.entry.day_off_reason(), Some(DEFAULT_DAY_OFF_REASON));
    }

    #[test]
    fn test_day_off_reason_ignored_for_work() {
        let json = r#"{ "date": "2025-03-03", "clock_in": "09:00", "clock_out": "18:00", "day_off_reason": "Sick" }"#;
        let request: NewWorkRecordRequest = serde_json::from_str(json).unwrap();
        let record = request.into_new_record("emp_007").unwrap();
        assert_eq!(record.entry.day_off_reason(), None);
    }

    #[test]
    fn test_update_request_carries_optional_status() {
        let json = r#"{ "date": "2025-03-05", "clock_in": "10:00", "clock_out": "19:00", "status": "approved" }"#;
        let request: UpdateWorkRecordRequest = serde_json::from_str(json).unwrap();
        let update = request.into_update().unwrap();
        assert_eq!(update.status, Some(RecordStatus::Approved));
        assert_eq!(
            update.entry.clock_times().0,
            Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        );

        let json = r#"{ "date": "2025-03-05", "work_type": "vacation" }"#;
        let request: UpdateWorkRecordRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.into_update(),
            Err(PayrollError::InvalidWorkType { .. })
        ));
    }

    #[test]
    fn test_announcement_request_defaults() {
        let json = r#"{ "title": "Payday moved", "content": "Pay lands on the 24th." }"#;
        let request: AnnouncementRequest = serde_json::from_str(json).unwrap();
        let draft = request.into_draft();
        assert_eq!(draft.priority, 1);
        assert!(draft.is_active);
        assert_eq!(draft.author_id, None);
    }
}
