//! Record storage for the payroll engine.
//!
//! Storage sits behind the [`PayrollRepository`] trait and is injected into
//! the service and API layers; [`InMemoryRepository`] is the bundled
//! implementation.

mod memory;
mod repository;
mod service;

pub use memory::InMemoryRepository;
pub use repository::{
    AnnouncementDraft, DeductionDraft, NewWorkRecord, PayrollRepository, WorkRecordUpdate,
};
pub use service::{MonthlyPayroll, PayrollService};
