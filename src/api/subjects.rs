//! Subject API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{found, require_complete, success, ApiResult};
use crate::models::{SubjectDraft, SubjectView};
use crate::AppState;

/// Optional filter for the subject list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFilter {
    pub degree_id: Option<String>,
}

/// GET /api/subjects - List subjects by code, or one degree's subjects by age.
pub async fn list_subjects(
    State(state): State<AppState>,
    Query(filter): Query<SubjectFilter>,
) -> ApiResult<Vec<SubjectView>> {
    let subjects = match filter.degree_id {
        Some(degree_id) => state.repo.list_subjects_by_degree(&degree_id).await?,
        None => state.repo.list_subjects().await?,
    };
    success(subjects)
}

/// GET /api/subjects/:id - Get a single subject.
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SubjectView> {
    let subject = state.repo.get_subject(&id).await?;
    success(found(subject, "Subject", &id)?)
}

/// POST /api/subjects - Create a new subject.
pub async fn create_subject(
    State(state): State<AppState>,
    Json(draft): Json<SubjectDraft>,
) -> ApiResult<SubjectView> {
    require_complete(&draft)?;
    success(state.repo.create_subject(&draft).await?)
}

/// PUT /api/subjects/:id - Replace a subject's editable fields.
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SubjectDraft>,
) -> ApiResult<SubjectView> {
    require_complete(&draft)?;
    success(state.repo.update_subject(&id, &draft).await?)
}

/// DELETE /api/subjects/:id - Delete a subject.
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_subject(&id).await?;
    success(())
}
