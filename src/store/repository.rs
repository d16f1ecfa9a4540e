//! Data-access interface for employees, work records, deduction rules and
//! announcements.
//!
//! The payroll calculator never touches storage. Callers fetch snapshots
//! through a [`PayrollRepository`] and pass them to the pure functions in
//! [`crate::calculation`].

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::{
    Announcement, DeductionKind, DeductionPreset, DeductionRule, Employee, PayPeriod,
    RecordStatus, WorkEntry, WorkRecord,
};

/// A work record as submitted, before it has an id or a review status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day the record covers.
    pub date: NaiveDate,
    /// Worked shift or day off.
    pub entry: WorkEntry,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// The editable parts of a stored work record.
///
/// The owning employee never changes. `status` is left alone when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecordUpdate {
    /// The calendar day the record covers.
    pub date: NaiveDate,
    /// Worked shift or day off.
    pub entry: WorkEntry,
    /// New review status, if it changes.
    pub status: Option<RecordStatus>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A deduction rule as entered in a form.
///
/// Saved as a new rule when `id` is `None`, otherwise replaces the rule with
/// that id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionDraft {
    /// The rule to update, or `None` to create one.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee the rule applies to.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Fixed amount or percentage of gross pay.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Currency amount or percent.
    pub amount: Decimal,
    /// Whether the rule is applied.
    pub is_active: bool,
}

impl DeductionDraft {
    /// Starts a new, active rule for `employee_id` from a configured preset.
    pub fn from_preset(preset: &DeductionPreset, employee_id: &str) -> Self {
        Self {
            id: None,
            employee_id: employee_id.to_string(),
            name: preset.name.clone(),
            kind: preset.kind,
            amount: preset.amount,
            is_active: true,
        }
    }
}

/// An announcement as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementDraft {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// The manager posting it.
    pub author_id: Option<String>,
    /// 1 (normal) to 3 (urgent).
    pub priority: u8,
    /// Whether the banner shows it.
    pub is_active: bool,
}

/// Storage operations the payroll workflows need.
///
/// Implementations must reject a second work record for the same employee
/// and date with [`crate::error::PayrollError::DuplicateWorkRecord`], must
/// validate deduction drafts before saving them, and must return
/// [`crate::error::PayrollError::NotFound`] for unknown ids.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    /// Fetches one employee.
    async fn get_employee(&self, id: &str) -> PayrollResult<Employee>;

    /// Creates or replaces an employee.
    async fn upsert_employee(&self, employee: Employee) -> PayrollResult<Employee>;

    /// Lists an employee's records within a period, newest date first.
    async fn list_work_records(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> PayrollResult<Vec<WorkRecord>>;

    /// Lists every pending record across employees, oldest date first.
    async fn list_pending_work_records(&self) -> PayrollResult<Vec<WorkRecord>>;

    /// Stores a new record with [`RecordStatus::Pending`].
    async fn insert_work_record(&self, record: NewWorkRecord) -> PayrollResult<WorkRecord>;

    /// Replaces the date, entry and notes of a record and optionally its
    /// status.
    ///
    /// Moving a record onto a date the employee already has a record for is
    /// rejected the same way an insert is.
    async fn update_work_record(
        &self,
        id: &str,
        update: WorkRecordUpdate,
    ) -> PayrollResult<WorkRecord>;

    /// Removes a work record.
    async fn delete_work_record(&self, id: &str) -> PayrollResult<()>;

    /// Changes the review status of a record.
    async fn set_work_record_status(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> PayrollResult<WorkRecord>;

    /// Lists an employee's deduction rules, optionally only the active ones.
    async fn list_deductions(
        &self,
        employee_id: &str,
        active_only: bool,
    ) -> PayrollResult<Vec<DeductionRule>>;

    /// Validates and stores a deduction rule.
    async fn save_deduction(&self, draft: DeductionDraft) -> PayrollResult<DeductionRule>;

    /// Turns a deduction rule on or off.
    async fn set_deduction_active(&self, id: &str, is_active: bool)
    -> PayrollResult<DeductionRule>;

    /// Removes a deduction rule.
    async fn delete_deduction(&self, id: &str) -> PayrollResult<()>;

    /// Lists announcements by priority, highest first, then newest first.
    async fn list_announcements(&self, active_only: bool) -> PayrollResult<Vec<Announcement>>;

    /// Validates and stores a new announcement.
    async fn create_announcement(&self, draft: AnnouncementDraft) -> PayrollResult<Announcement>;

    /// Validates and replaces the editable parts of an announcement.
    async fn update_announcement(
        &self,
        id: &str,
        draft: AnnouncementDraft,
    ) -> PayrollResult<Announcement>;

    /// Shows or hides an announcement.
    async fn set_announcement_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> PayrollResult<Announcement>;

    /// Removes an announcement.
    async fn delete_announcement(&self, id: &str) -> PayrollResult<()>;
}
