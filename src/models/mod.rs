//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod announcement;
mod deduction;
mod employee;
mod pay_period;
mod payroll_summary;
mod work_record;

pub use announcement::{
    Announcement, BANNER_LIMIT, MAX_PRIORITY, MIN_PRIORITY, select_banner, sort_announcements,
    validate_announcement,
};
pub use deduction::{
    DeductionKind, DeductionPreset, DeductionRule, MAX_FIXED_DEDUCTION, validate_deduction,
};
pub use employee::{Employee, MAX_HOURLY_WAGE, validate_hourly_wage};
pub use pay_period::PayPeriod;
pub use payroll_summary::{
    AuditStep, AuditTrace, AuditWarning, DeductionLine, PayrollReport, PayrollSummary, RecordLine,
};
pub use work_record::{
    DEFAULT_DAY_OFF_REASON, RecordStatus, WorkEntry, WorkRecord, filter_by_status,
    parse_time_of_day,
};
