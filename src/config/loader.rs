//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{DeductionPreset, validate_hourly_wage};

use super::types::{PayrollConfig, PayrollSettings, PresetsConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml            # Currency and default hourly wage
/// └── deduction_presets.yaml  # Deduction templates
/// ```
///
/// # Example
///
/// ```no_run
/// use worklog_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Default wage: {}", loader.default_hourly_wage());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The default wage is out of range or a preset fails deduction validation
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;
        validate_hourly_wage(settings.default_hourly_wage)?;

        let presets_config =
            Self::load_yaml::<PresetsConfig>(&path.join("deduction_presets.yaml"))?;
        for preset in &presets_config.presets {
            crate::models::validate_deduction(&preset.name, preset.kind, preset.amount)?;
        }

        tracing::debug!(
            path = %path.display(),
            presets = presets_config.presets.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(settings, presets_config.presets),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the currency code amounts are expressed in.
    pub fn currency(&self) -> &str {
        &self.config.settings().currency
    }

    /// Returns the hourly wage for employees without one of their own.
    pub fn default_hourly_wage(&self) -> Decimal {
        self.config.settings().default_hourly_wage
    }

    /// Returns all deduction presets.
    pub fn presets(&self) -> &[DeductionPreset] {
        self.config.presets()
    }

    /// Finds a deduction preset by name (case-insensitive).
    pub fn find_preset(&self, name: &str) -> Option<&DeductionPreset> {
        self.presets()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}
