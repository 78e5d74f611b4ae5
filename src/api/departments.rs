//! Department API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{found, require_complete, success, ApiResult};
use crate::models::{Department, DepartmentDraft};
use crate::AppState;

/// GET /api/departments - List all departments.
pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    success(state.repo.list_departments().await?)
}

/// GET /api/departments/:id - Get a single department.
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Department> {
    let department = state.repo.get_department(&id).await?;
    success(found(department, "Department", &id)?)
}

/// POST /api/departments - Create a new department.
pub async fn create_department(
    State(state): State<AppState>,
    Json(draft): Json<DepartmentDraft>,
) -> ApiResult<Department> {
    require_complete(&draft)?;
    success(state.repo.create_department(&draft).await?)
}

/// PUT /api/departments/:id - Replace a department's editable fields.
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<DepartmentDraft>,
) -> ApiResult<Department> {
    require_complete(&draft)?;
    success(state.repo.update_department(&id, &draft).await?)
}

/// DELETE /api/departments/:id - Delete a department.
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_department(&id).await?;
    success(())
}
