//! Response types for the payroll API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Response body for the `/hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// Hours worked.
    pub hours: Decimal,
    /// Whether the shift ended in an earlier clock hour than it started.
    pub night_shift: bool,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            PayrollError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            PayrollError::InvalidTimeOfDay { .. } => {
                Self::bad_request(ApiError::new("INVALID_TIME", message))
            }
            PayrollError::InvalidWorkType { .. } => {
                Self::bad_request(ApiError::new("INVALID_WORK_TYPE", message))
            }
            PayrollError::InvalidDeduction { field, .. } => Self::bad_request(
                ApiError::with_details("INVALID_DEDUCTION", message, format!("field: {}", field)),
            ),
            PayrollError::InvalidAnnouncement { field, .. } => {
                Self::bad_request(ApiError::with_details(
                    "INVALID_ANNOUNCEMENT",
                    message,
                    format!("field: {}", field),
                ))
            }
            PayrollError::InvalidWage { .. } => {
                Self::bad_request(ApiError::new("INVALID_WAGE", message))
            }
            PayrollError::InvalidPayPeriod { .. } => {
                Self::bad_request(ApiError::new("INVALID_PAY_PERIOD", message))
            }
            PayrollError::DuplicateWorkRecord { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_WORK_RECORD", message),
            },
            PayrollError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let response: ApiErrorResponse = PayrollError::InvalidTimeOfDay {
            value: "9am".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_TIME");

        let response: ApiErrorResponse = PayrollError::InvalidDeduction {
            field: "amount".to_string(),
            message: "too big".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.details.as_deref(), Some("field: amount"));
    }

    #[test]
    fn test_invalid_announcement_maps_to_400() {
        let response: ApiErrorResponse = PayrollError::InvalidAnnouncement {
            field: "priority".to_string(),
            message: "4 must be between 1 and 3".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_ANNOUNCEMENT");
        assert_eq!(response.error.details.as_deref(), Some("field: priority"));
    }

    #[test]
    fn test_duplicate_maps_to_409() {
        let response: ApiErrorResponse = PayrollError::DuplicateWorkRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "DUPLICATE_WORK_RECORD");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = PayrollError::not_found("Employee", "emp_404").into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.message, "Employee not found: emp_404");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let response: ApiErrorResponse = PayrollError::ConfigNotFound {
            path: "/x/payroll.yaml".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
