//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::DeductionPreset;

/// General payroll settings from `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollSettings {
    /// ISO currency code amounts are expressed in (e.g., "KRW").
    pub currency: String,
    /// Hourly wage used for employees without one of their own.
    pub default_hourly_wage: Decimal,
}

/// Deduction presets configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetsConfig {
    /// The presets, in display order.
    pub presets: Vec<DeductionPreset>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// General settings.
    settings: PayrollSettings,
    /// Deduction presets.
    presets: Vec<DeductionPreset>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(settings: PayrollSettings, presets: Vec<DeductionPreset>) -> Self {
        Self { settings, presets }
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns all deduction presets.
    pub fn presets(&self) -> &[DeductionPreset] {
        &self.presets
    }
}
