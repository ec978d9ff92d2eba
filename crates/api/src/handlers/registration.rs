//! Handlers for the `/registrations` resource.
//!
//! The request body mirrors the form: the ADGE name, the declared number of
//! employees, and one `{name, email, phone}` binding per employee in order.

use std::time::Duration;

use attendance_core::batch::{EmployeeRecord, SubmissionBatch, MAX_EMPLOYEES};
use attendance_core::submission::{self, SubmissionReceipt};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for submit and dry-run validation.
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub adge_name: String,
    #[serde(default)]
    #[validate(range(min = 1, max = MAX_EMPLOYEES))]
    pub employee_count: u32,
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

impl RegistrationRequest {
    fn into_batch(self) -> AppResult<SubmissionBatch> {
        self.validate().map_err(|_| {
            AppError::BadRequest(format!(
                "Number of employees must be between 1 and {MAX_EMPLOYEES}, got {}",
                self.employee_count
            ))
        })?;
        Ok(SubmissionBatch::from_form(
            self.adge_name,
            self.employee_count,
            self.employees,
        )?)
    }
}

/// Dry-run result.
#[derive(Debug, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
}

/// POST /api/v1/registrations
///
/// Validate every field of every employee; if all pass, append one row per
/// employee and return 201. Any violation returns 400 with the full list and
/// appends nothing. The store append is bounded by `STORE_TIMEOUT_SECS`, which
/// is below the request timeout, so a slow store yields 502 `STORE_ERROR`.
pub async fn submit(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmissionReceipt>>)> {
    let batch = input.into_batch()?;
    let deadline = Duration::from_secs(state.config.store_timeout_secs);
    let receipt = submission::submit(state.store.as_ref(), &batch, deadline).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// POST /api/v1/registrations/validate
///
/// Run the validation pass without touching the store.
pub async fn validate(
    AppJson(input): AppJson<RegistrationRequest>,
) -> AppResult<Json<DataResponse<ValidationOutcome>>> {
    let batch = input.into_batch()?;
    submission::check(&batch)?;
    Ok(Json(DataResponse {
        data: ValidationOutcome { valid: true },
    }))
}
