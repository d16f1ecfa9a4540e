//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{PayrollRepository, PayrollService};

/// Shared application state.
///
/// Holds the loaded payroll configuration and the service over the injected
/// record repository.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: PayrollService,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The service falls back to the configured default hourly wage.
    pub fn new(config: ConfigLoader, repository: Arc<dyn PayrollRepository>) -> Self {
        let service = PayrollService::new(repository, config.default_hourly_wage());
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }

    /// Returns the record repository.
    pub fn repository(&self) -> &Arc<dyn PayrollRepository> {
        self.service.repository()
    }
}
