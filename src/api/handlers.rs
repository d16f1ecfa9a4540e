//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_hours, compute_payroll, is_night_shift};
use crate::error::PayrollError;
use crate::models::{PayPeriod, PayrollReport, filter_by_status, select_banner};
use crate::store::DeductionDraft;

use super::request::{
    ActiveRequest, AnnouncementRequest, CalculationRequest, DeductionRequest, EmployeeRequest,
    HoursRequest, NewWorkRecordRequest, PayrollQuery, PresetRequest, StatusRequest,
    UpdateWorkRecordRequest,
};
use super::response::{ApiError, ApiErrorResponse, HoursResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/hours", post(hours_handler))
        .route("/deduction-presets", get(presets_handler))
        .route("/employees/:id", put(upsert_employee_handler))
        .route("/employees/:id/payroll", get(payroll_handler))
        .route(
            "/employees/:id/work-records",
            get(list_work_records_handler).post(add_work_record_handler),
        )
        .route(
            "/employees/:id/deductions",
            get(list_deductions_handler).post(save_deduction_handler),
        )
        .route(
            "/employees/:id/deductions/from-preset",
            post(deduction_from_preset_handler),
        )
        .route("/work-records/pending", get(pending_handler))
        .route(
            "/work-records/:id",
            put(update_work_record_handler).delete(delete_work_record_handler),
        )
        .route("/work-records/:id/status", put(set_status_handler))
        .route("/deductions/:id/active", put(set_active_handler))
        .route("/deductions/:id", delete(delete_deduction_handler))
        .route(
            "/announcements",
            get(list_announcements_handler).post(create_announcement_handler),
        )
        .route("/announcements/banner", get(banner_handler))
        .route(
            "/announcements/:id",
            put(update_announcement_handler).delete(delete_announcement_handler),
        )
        .route(
            "/announcements/:id/active",
            put(set_announcement_active_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: PayrollError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

/// Handler for POST /calculate.
///
/// Computes a payroll report from the records, wage and deduction rules in
/// the request body. Nothing is read from or written to storage.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employee_id = request.employee_id.clone();
    let (hourly_wage, records, deductions) = match request.into_domain() {
        Ok(parts) => parts,
        Err(err) => return error_response(correlation_id, err),
    };
    let hourly_wage = hourly_wage
        .filter(|w| !w.is_zero())
        .unwrap_or_else(|| state.config().default_hourly_wage());

    let start_time = Instant::now();
    let summary = compute_payroll(&records, hourly_wage, &deductions);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        records_count = records.len(),
        gross_pay = %summary.gross_pay,
        net_pay = %summary.net_pay,
        warnings = summary.audit_trace.warnings.len(),
        duration_us,
        "Calculation completed successfully"
    );

    let report = PayrollReport::new(summary, employee_id, None, duration_us);
    json_response(StatusCode::OK, report)
}

/// Handler for POST /hours.
async fn hours_handler(payload: Result<Json<HoursRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match request.to_entry() {
        Ok(entry) => {
            let (clock_in, clock_out) = entry.clock_times();
            json_response(
                StatusCode::OK,
                HoursResponse {
                    hours: compute_hours(&entry),
                    night_shift: is_night_shift(clock_in, clock_out),
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /deduction-presets.
async fn presets_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().presets())
}

/// Handler for PUT /employees/:id.
async fn upsert_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .upsert_employee(request.into_employee(&employee_id))
        .await
    {
        Ok(employee) => {
            info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee saved");
            json_response(StatusCode::OK, employee)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:id/payroll.
///
/// Computes the month's report from stored records and active deductions.
async fn payroll_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing monthly payroll request"
    );

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match state
        .service()
        .monthly_summary(&employee_id, query.year, query.month)
        .await
    {
        Ok(monthly) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                records_count = monthly.summary.records.len(),
                gross_pay = %monthly.summary.gross_pay,
                net_pay = %monthly.summary.net_pay,
                duration_us,
                "Monthly payroll completed"
            );
            let report = PayrollReport::new(
                monthly.summary,
                Some(monthly.employee.id),
                Some(monthly.pay_period),
                duration_us,
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:id/work-records.
///
/// Lists one month of records, newest date first, optionally narrowed to a
/// single status.
async fn list_work_records_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let repository = state.repository();
    let result = async {
        let period = PayPeriod::for_month(query.year, query.month)?;
        repository.get_employee(&employee_id).await?;
        repository.list_work_records(&employee_id, &period).await
    }
    .await;

    match result {
        Ok(records) => {
            let selected: Vec<_> = filter_by_status(&records, query.status);
            json_response(StatusCode::OK, selected)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees/:id/work-records.
///
/// New records always start out pending.
async fn add_work_record_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<NewWorkRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let record = match request.into_new_record(&employee_id) {
        Ok(record) => record,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.repository().insert_work_record(record).await {
        Ok(stored) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                record_id = %stored.id,
                date = %stored.date,
                "Work record created"
            );
            json_response(StatusCode::CREATED, stored)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /work-records/pending.
async fn pending_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().list_pending_work_records().await {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                records_count = records.len(),
                "Pending work records listed"
            );
            json_response(StatusCode::OK, records)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /work-records/:id.
///
/// Replaces date, entry and notes. The status changes only when the body
/// carries one.
async fn update_work_record_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<UpdateWorkRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let update = match request.into_update() {
        Ok(update) => update,
        Err(err) => return error_response(correlation_id, err),
    };

    match state
        .repository()
        .update_work_record(&record_id, update)
        .await
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                date = %record.date,
                status = %record.status,
                "Work record updated"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /work-records/:id.
async fn delete_work_record_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().delete_work_record(&record_id).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, record_id = %record_id, "Work record deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /work-records/:id/status.
async fn set_status_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .set_work_record_status(&record_id, request.status)
        .await
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                status = %record.status,
                "Work record status changed"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:id/deductions.
async fn list_deductions_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let repository = state.repository();

    let result = async {
        repository.get_employee(&employee_id).await?;
        repository.list_deductions(&employee_id, false).await
    }
    .await;

    match result {
        Ok(rules) => json_response(StatusCode::OK, rules),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees/:id/deductions.
///
/// Creates a rule, or replaces the rule named by `id` in the body.
async fn save_deduction_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let status = if request.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    match state
        .repository()
        .save_deduction(request.into_draft(&employee_id))
        .await
    {
        Ok(rule) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                deduction_id = %rule.id,
                "Deduction saved"
            );
            json_response(status, rule)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees/:id/deductions/from-preset.
///
/// Creates an active rule with the preset's name, type and amount.
async fn deduction_from_preset_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<PresetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let draft = match state.config().find_preset(&request.preset) {
        Some(preset) => DeductionDraft::from_preset(preset, &employee_id),
        None => {
            return error_response(
                correlation_id,
                PayrollError::not_found("Deduction preset", request.preset),
            );
        }
    };

    match state.repository().save_deduction(draft).await {
        Ok(rule) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                deduction_id = %rule.id,
                preset = %rule.name,
                "Deduction created from preset"
            );
            json_response(StatusCode::CREATED, rule)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /deductions/:id/active.
async fn set_active_handler(
    State(state): State<AppState>,
    Path(deduction_id): Path<String>,
    payload: Result<Json<ActiveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .set_deduction_active(&deduction_id, request.is_active)
        .await
    {
        Ok(rule) => {
            info!(
                correlation_id = %correlation_id,
                deduction_id = %rule.id,
                is_active = rule.is_active,
                "Deduction toggled"
            );
            json_response(StatusCode::OK, rule)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /deductions/:id.
async fn delete_deduction_handler(
    State(state): State<AppState>,
    Path(deduction_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().delete_deduction(&deduction_id).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, deduction_id = %deduction_id, "Deduction deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /announcements.
///
/// Lists every announcement, active or not, for the management screen.
async fn list_announcements_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().list_announcements(false).await {
        Ok(announcements) => json_response(StatusCode::OK, announcements),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /announcements/banner.
async fn banner_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().list_announcements(true).await {
        Ok(announcements) => json_response(StatusCode::OK, select_banner(&announcements)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /announcements.
async fn create_announcement_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnouncementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .create_announcement(request.into_draft())
        .await
    {
        Ok(announcement) => {
            info!(
                correlation_id = %correlation_id,
                announcement_id = %announcement.id,
                priority = announcement.priority,
                "Announcement created"
            );
            json_response(StatusCode::CREATED, announcement)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /announcements/:id.
async fn update_announcement_handler(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
    payload: Result<Json<AnnouncementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .update_announcement(&announcement_id, request.into_draft())
        .await
    {
        Ok(announcement) => {
            info!(
                correlation_id = %correlation_id,
                announcement_id = %announcement.id,
                "Announcement updated"
            );
            json_response(StatusCode::OK, announcement)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /announcements/:id/active.
async fn set_announcement_active_handler(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
    payload: Result<Json<ActiveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state
        .repository()
        .set_announcement_active(&announcement_id, request.is_active)
        .await
    {
        Ok(announcement) => {
            info!(
                correlation_id = %correlation_id,
                announcement_id = %announcement.id,
                is_active = announcement.is_active,
                "Announcement toggled"
            );
            json_response(StatusCode::OK, announcement)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /announcements/:id.
async fn delete_announcement_handler(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.repository().delete_announcement(&announcement_id).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                announcement_id = %announcement_id,
                "Announcement deleted"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}
