//! Attendance and payroll engine.
//!
//! Turns clock-in/clock-out work records into worked hours and a monthly
//! payroll summary: gross pay from approved hours, fixed and percentage
//! deductions, and net pay, each with an audit trace of how it was reached.
//!
//! The pure calculations live in [`calculation`]. Stored records go through
//! the [`store::PayrollRepository`] trait, and [`api`] exposes both over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
