//! REST API module.
//!
//! One handler set per catalog collection, all sharing the same envelope.

mod degrees;
mod departments;
mod semesters;
mod subjects;

pub use degrees::*;
pub use departments::*;
pub use semesters::*;
pub use subjects::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Draft;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Reject a draft with an empty required field before it reaches the database.
fn require_complete<D: Draft>(draft: &D) -> Result<(), AppError> {
    match draft.missing_field() {
        Some(field) => Err(AppError::Validation(format!("{} is required", field))),
        None => Ok(()),
    }
}

/// Turn an empty lookup result into a 404.
fn found<T>(record: Option<T>, label: &str, id: &str) -> Result<T, AppError> {
    record.ok_or_else(|| AppError::NotFound(format!("{} {} not found", label, id)))
}
