//! Degree API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{found, require_complete, success, ApiResult};
use crate::models::{DegreeDraft, DegreeView};
use crate::AppState;

/// GET /api/degrees - List all degrees with their department names.
pub async fn list_degrees(State(state): State<AppState>) -> ApiResult<Vec<DegreeView>> {
    success(state.repo.list_degrees().await?)
}

/// GET /api/degrees/:id - Get a single degree.
pub async fn get_degree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DegreeView> {
    let degree = state.repo.get_degree(&id).await?;
    success(found(degree, "Degree", &id)?)
}

/// POST /api/degrees - Create a new degree.
pub async fn create_degree(
    State(state): State<AppState>,
    Json(draft): Json<DegreeDraft>,
) -> ApiResult<DegreeView> {
    require_complete(&draft)?;
    success(state.repo.create_degree(&draft).await?)
}

/// PUT /api/degrees/:id - Replace a degree's editable fields.
pub async fn update_degree(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<DegreeDraft>,
) -> ApiResult<DegreeView> {
    require_complete(&draft)?;
    success(state.repo.update_degree(&id, &draft).await?)
}

/// DELETE /api/degrees/:id - Delete a degree.
pub async fn delete_degree(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_degree(&id).await?;
    success(())
}
