//! Configuration loading for the payroll engine.
//!
//! This module loads payroll settings and deduction presets from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use worklog_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Currency: {}", config.currency());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayrollConfig, PayrollSettings, PresetsConfig};
