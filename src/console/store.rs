//! Data-access ports used by the console.
//!
//! The console never talks to SQLite or HTTP directly; it goes through an
//! [`EntityStore`] per entity, grouped into a [`CatalogBackend`].

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::AppError;
use crate::models::{
    DegreeDraft, DegreeView, Department, DepartmentDraft, Draft, Record, SemesterDraft,
    SemesterView, SubjectDraft, SubjectView,
};

/// A failed data-service call. Only a human-readable message crosses the port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        ServiceError::new(err.message())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::new(format!("Request failed: {}", err))
    }
}

/// Read-all and single-row mutations for one entity.
///
/// Reads and mutation results are read models with parent display names
/// already resolved.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Draft: Draft;
    type Record: Record<Draft = Self::Draft>;

    async fn list_all(&self) -> Result<Vec<Self::Record>, ServiceError>;

    async fn create(&self, draft: &Self::Draft) -> Result<Self::Record, ServiceError>;

    /// Replace every editable field of `id` with the draft's values.
    async fn update(&self, id: &str, draft: &Self::Draft) -> Result<Self::Record, ServiceError>;

    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// Source of the four catalog stores.
///
/// Each call hands out a fresh store; screens keep no shared cache.
pub trait CatalogBackend: Clone + Send + Sync {
    type Departments: EntityStore<Record = Department, Draft = DepartmentDraft>;
    type Degrees: EntityStore<Record = DegreeView, Draft = DegreeDraft>;
    type Semesters: EntityStore<Record = SemesterView, Draft = SemesterDraft>;
    type Subjects: EntityStore<Record = SubjectView, Draft = SubjectDraft>;

    fn departments(&self) -> Self::Departments;
    fn degrees(&self) -> Self::Degrees;
    fn semesters(&self) -> Self::Semesters;
    fn subjects(&self) -> Self::Subjects;
}
