//! Semester mapping API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{found, require_complete, success, ApiResult};
use crate::models::{SemesterDraft, SemesterView};
use crate::AppState;

/// Optional filter for the semester list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterFilter {
    pub degree_id: Option<String>,
}

/// GET /api/semesters - List semester mappings, optionally for one degree.
pub async fn list_semesters(
    State(state): State<AppState>,
    Query(filter): Query<SemesterFilter>,
) -> ApiResult<Vec<SemesterView>> {
    let semesters = match filter.degree_id {
        Some(degree_id) => state.repo.list_semesters_by_degree(&degree_id).await?,
        None => state.repo.list_semesters().await?,
    };
    success(semesters)
}

/// GET /api/semesters/:id - Get a single semester mapping.
pub async fn get_semester(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SemesterView> {
    let semester = state.repo.get_semester(&id).await?;
    success(found(semester, "Semester mapping", &id)?)
}

/// POST /api/semesters - Create a new semester mapping.
pub async fn create_semester(
    State(state): State<AppState>,
    Json(draft): Json<SemesterDraft>,
) -> ApiResult<SemesterView> {
    require_complete(&draft)?;
    success(state.repo.create_semester(&draft).await?)
}

/// PUT /api/semesters/:id - Replace a semester mapping's editable fields.
pub async fn update_semester(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SemesterDraft>,
) -> ApiResult<SemesterView> {
    require_complete(&draft)?;
    success(state.repo.update_semester(&id, &draft).await?)
}

/// DELETE /api/semesters/:id - Delete a semester mapping.
pub async fn delete_semester(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_semester(&id).await?;
    success(())
}
