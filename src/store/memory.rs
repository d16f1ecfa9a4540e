//! In-memory implementation of [`PayrollRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Announcement, DeductionRule, Employee, PayPeriod, RecordStatus, WorkRecord,
    sort_announcements, validate_announcement, validate_deduction, validate_hourly_wage,
};

use super::repository::{
    AnnouncementDraft, DeductionDraft, NewWorkRecord, PayrollRepository, WorkRecordUpdate,
};

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<String, Employee>,
    work_records: HashMap<String, WorkRecord>,
    // Kept in creation order.
    deductions: Vec<DeductionRule>,
    // Kept in creation order.
    announcements: Vec<Announcement>,
}

/// A [`PayrollRepository`] backed by maps behind a [`RwLock`].
///
/// Ids are random UUIDs. Suitable for tests, demos and single-process use.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayrollRepository for InMemoryRepository {
    async fn get_employee(&self, id: &str) -> PayrollResult<Employee> {
        let tables = self.tables.read().await;
        tables
            .employees
            .get(id)
            .cloned()
            .ok_or_else(|| PayrollError::not_found("Employee", id))
    }

    async fn upsert_employee(&self, employee: Employee) -> PayrollResult<Employee> {
        if let Some(wage) = employee.hourly_wage {
            validate_hourly_wage(wage)?;
        }

        let mut tables = self.tables.write().await;
        tables
            .employees
            .insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    async fn list_work_records(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> PayrollResult<Vec<WorkRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<WorkRecord> = tables
            .work_records
            .values()
            .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn list_pending_work_records(&self) -> PayrollResult<Vec<WorkRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<WorkRecord> = tables
            .work_records
            .values()
            .filter(|r| r.status == RecordStatus::Pending)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.employee_id.cmp(&b.employee_id)));
        Ok(records)
    }

    async fn insert_work_record(&self, record: NewWorkRecord) -> PayrollResult<WorkRecord> {
        let mut tables = self.tables.write().await;

        if !tables.employees.contains_key(&record.employee_id) {
            return Err(PayrollError::not_found("Employee", record.employee_id));
        }

        let duplicate = tables
            .work_records
            .values()
            .any(|r| r.employee_id == record.employee_id && r.date == record.date);
        if duplicate {
            return Err(PayrollError::DuplicateWorkRecord {
                employee_id: record.employee_id,
                date: record.date,
            });
        }

        let stored = WorkRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: record.employee_id,
            date: record.date,
            entry: record.entry,
            status: RecordStatus::Pending,
            notes: record.notes,
        };
        debug!(record_id = %stored.id, employee_id = %stored.employee_id, date = %stored.date, "Inserted work record");
        tables
            .work_records
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn update_work_record(
        &self,
        id: &str,
        update: WorkRecordUpdate,
    ) -> PayrollResult<WorkRecord> {
        let mut tables = self.tables.write().await;

        let employee_id = tables
            .work_records
            .get(id)
            .map(|r| r.employee_id.clone())
            .ok_or_else(|| PayrollError::not_found("Work record", id))?;

        let duplicate = tables
            .work_records
            .values()
            .any(|r| r.id != id && r.employee_id == employee_id && r.date == update.date);
        if duplicate {
            return Err(PayrollError::DuplicateWorkRecord {
                employee_id,
                date: update.date,
            });
        }

        let record = tables
            .work_records
            .get_mut(id)
            .ok_or_else(|| PayrollError::not_found("Work record", id))?;
        record.date = update.date;
        record.entry = update.entry;
        record.notes = update.notes;
        if let Some(status) = update.status {
            record.status = status;
        }
        debug!(record_id = %record.id, date = %record.date, "Updated work record");
        Ok(record.clone())
    }

    async fn delete_work_record(&self, id: &str) -> PayrollResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .work_records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PayrollError::not_found("Work record", id))
    }

    async fn set_work_record_status(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> PayrollResult<WorkRecord> {
        let mut tables = self.tables.write().await;
        let record = tables
            .work_records
            .get_mut(id)
            .ok_or_else(|| PayrollError::not_found("Work record", id))?;
        record.status = status;
        Ok(record.clone())
    }

    async fn list_deductions(
        &self,
        employee_id: &str,
        active_only: bool,
    ) -> PayrollResult<Vec<DeductionRule>> {
        let tables = self.tables.read().await;
        Ok(tables
            .deductions
            .iter()
            .filter(|d| d.employee_id == employee_id && (!active_only || d.is_active))
            .cloned()
            .collect())
    }

    async fn save_deduction(&self, draft: DeductionDraft) -> PayrollResult<DeductionRule> {
        validate_deduction(&draft.name, draft.kind, draft.amount)?;

        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&draft.employee_id) {
            return Err(PayrollError::not_found("Employee", draft.employee_id));
        }

        let rule = DeductionRule {
            id: draft
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            employee_id: draft.employee_id,
            name: draft.name.trim().to_string(),
            kind: draft.kind,
            amount: draft.amount,
            is_active: draft.is_active,
        };

        match draft.id {
            Some(id) => {
                let existing = tables
                    .deductions
                    .iter_mut()
                    .find(|d| d.id == id && d.employee_id == rule.employee_id)
                    .ok_or_else(|| PayrollError::not_found("Deduction", id.as_str()))?;
                *existing = rule.clone();
            }
            None => tables.deductions.push(rule.clone()),
        }
        Ok(rule)
    }

    async fn set_deduction_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> PayrollResult<DeductionRule> {
        let mut tables = self.tables.write().await;
        let rule = tables
            .deductions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| PayrollError::not_found("Deduction", id))?;
        rule.is_active = is_active;
        Ok(rule.clone())
    }

    async fn delete_deduction(&self, id: &str) -> PayrollResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.deductions.len();
        tables.deductions.retain(|d| d.id != id);
        if tables.deductions.len() == before {
            return Err(PayrollError::not_found("Deduction", id));
        }
        Ok(())
    }

    async fn list_announcements(&self, active_only: bool) -> PayrollResult<Vec<Announcement>> {
        let tables = self.tables.read().await;
        // Newest insertion first, so equal timestamps still list newest first.
        let mut announcements: Vec<Announcement> = tables
            .announcements
            .iter()
            .rev()
            .filter(|a| !active_only || a.is_active)
            .cloned()
            .collect();
        sort_announcements(&mut announcements);
        Ok(announcements)
    }

    async fn create_announcement(&self, draft: AnnouncementDraft) -> PayrollResult<Announcement> {
        validate_announcement(&draft.title, &draft.content, draft.priority)?;

        let now = Utc::now();
        let announcement = Announcement {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            author_id: draft.author_id,
            is_active: draft.is_active,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        };
        debug!(announcement_id = %announcement.id, priority = announcement.priority, "Created announcement");

        let mut tables = self.tables.write().await;
        tables.announcements.push(announcement.clone());
        Ok(announcement)
    }

    async fn update_announcement(
        &self,
        id: &str,
        draft: AnnouncementDraft,
    ) -> PayrollResult<Announcement> {
        validate_announcement(&draft.title, &draft.content, draft.priority)?;

        let mut tables = self.tables.write().await;
        let announcement = tables
            .announcements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PayrollError::not_found("Announcement", id))?;
        announcement.title = draft.title.trim().to_string();
        announcement.content = draft.content.trim().to_string();
        announcement.author_id = draft.author_id;
        announcement.priority = draft.priority;
        announcement.is_active = draft.is_active;
        announcement.updated_at = Utc::now();
        Ok(announcement.clone())
    }

    async fn set_announcement_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> PayrollResult<Announcement> {
        let mut tables = self.tables.write().await;
        let announcement = tables
            .announcements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PayrollError::not_found("Announcement", id))?;
        announcement.is_active = is_active;
        announcement.updated_at = Utc::now();
        Ok(announcement.clone())
    }

    async fn delete_announcement(&self, id: &str) -> PayrollResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.announcements.len();
        tables.announcements.retain(|a| a.id != id);
        if tables.announcements.len() == before {
            return Err(PayrollError::not_found("Announcement", id));
        }
        Ok(())
    }
}
