//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for stateless payroll
//! calculation, work record review, deduction management and
//! announcements.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActiveRequest, AnnouncementRequest, CalculationRequest, DeductionRequest, EmployeeRequest,
    HoursRequest, NewWorkRecordRequest, PayrollQuery, PresetRequest, StatusRequest,
    UpdateWorkRecordRequest, WorkRecordRequest,
};
pub use response::{ApiError, HoursResponse};
pub use state::AppState;
