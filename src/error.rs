//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while validating input, loading
//! configuration, or talking to the record store.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// The calculation functions themselves never fail; errors come from the
/// boundaries around them (parsing, validation, configuration, storage).
///
/// # Example
///
/// ```
/// use worklog_payroll::error::PayrollError;
///
/// let error = PayrollError::InvalidTimeOfDay {
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time of day '25:00': expected HH:MM or HH:MM:SS");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A clock value could not be parsed as a time of day.
    #[error("Invalid time of day '{value}': expected HH:MM or HH:MM:SS")]
    InvalidTimeOfDay {
        /// The raw value that was rejected.
        value: String,
    },

    /// The work type was neither `work` nor `day_off`.
    #[error("Invalid work type '{value}': expected 'work' or 'day_off'")]
    InvalidWorkType {
        /// The raw value that was rejected.
        value: String,
    },

    /// A deduction rule failed validation.
    #[error("Invalid deduction field '{field}': {message}")]
    InvalidDeduction {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An hourly wage was negative or above the supported maximum.
    #[error("Invalid hourly wage {wage}: must be between 0 and 100000000")]
    InvalidWage {
        /// The rejected wage.
        wage: rust_decimal::Decimal,
    },

    /// An announcement failed validation.
    #[error("Invalid announcement field '{field}': {message}")]
    InvalidAnnouncement {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pay period could not be built from the given year and month.
    #[error("Invalid pay period {year}-{month:02}")]
    InvalidPayPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An employee already has a work record on the given date.
    #[error("Work record already exists for employee '{employee_id}' on {date}")]
    DuplicateWorkRecord {
        /// The employee the record belongs to.
        employee_id: String,
        /// The conflicting date.
        date: chrono::NaiveDate,
    },

    /// A stored entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "Employee", "Work record").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::NotFound`] error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
