//! In-process adapter: console stores backed directly by the [`Repository`].

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::store::{CatalogBackend, EntityStore, ServiceError};
use crate::db::Repository;
use crate::models::{
    DegreeDraft, DegreeView, Department, DepartmentDraft, SemesterDraft, SemesterView,
    SubjectDraft, SubjectView,
};

/// Catalog backend sharing the service's repository.
#[derive(Clone)]
pub struct LocalCatalog {
    repo: Arc<Repository>,
}

impl LocalCatalog {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

/// One table of the local catalog, typed by the record it lists.
pub struct LocalTable<R> {
    repo: Arc<Repository>,
    _record: PhantomData<fn() -> R>,
}

impl<R> LocalTable<R> {
    fn new(repo: Arc<Repository>) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }
}

impl CatalogBackend for LocalCatalog {
    type Departments = LocalTable<Department>;
    type Degrees = LocalTable<DegreeView>;
    type Semesters = LocalTable<SemesterView>;
    type Subjects = LocalTable<SubjectView>;

    fn departments(&self) -> Self::Departments {
        LocalTable::new(self.repo.clone())
    }

    fn degrees(&self) -> Self::Degrees {
        LocalTable::new(self.repo.clone())
    }

    fn semesters(&self) -> Self::Semesters {
        LocalTable::new(self.repo.clone())
    }

    fn subjects(&self) -> Self::Subjects {
        LocalTable::new(self.repo.clone())
    }
}

#[async_trait]
impl EntityStore for LocalTable<Department> {
    type Draft = DepartmentDraft;
    type Record = Department;

    async fn list_all(&self) -> Result<Vec<Department>, ServiceError> {
        Ok(self.repo.list_departments().await?)
    }

    async fn create(&self, draft: &DepartmentDraft) -> Result<Department, ServiceError> {
        Ok(self.repo.create_department(draft).await?)
    }

    async fn update(&self, id: &str, draft: &DepartmentDraft) -> Result<Department, ServiceError> {
        Ok(self.repo.update_department(id, draft).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_department(id).await?)
    }
}

#[async_trait]
impl EntityStore for LocalTable<DegreeView> {
    type Draft = DegreeDraft;
    type Record = DegreeView;

    async fn list_all(&self) -> Result<Vec<DegreeView>, ServiceError> {
        Ok(self.repo.list_degrees().await?)
    }

    async fn create(&self, draft: &DegreeDraft) -> Result<DegreeView, ServiceError> {
        Ok(self.repo.create_degree(draft).await?)
    }

    async fn update(&self, id: &str, draft: &DegreeDraft) -> Result<DegreeView, ServiceError> {
        Ok(self.repo.update_degree(id, draft).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_degree(id).await?)
    }
}

#[async_trait]
impl EntityStore for LocalTable<SemesterView> {
    type Draft = SemesterDraft;
    type Record = SemesterView;

    async fn list_all(&self) -> Result<Vec<SemesterView>, ServiceError> {
        Ok(self.repo.list_semesters().await?)
    }

    async fn create(&self, draft: &SemesterDraft) -> Result<SemesterView, ServiceError> {
        Ok(self.repo.create_semester(draft).await?)
    }

    async fn update(&self, id: &str, draft: &SemesterDraft) -> Result<SemesterView, ServiceError> {
        Ok(self.repo.update_semester(id, draft).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_semester(id).await?)
    }
}

#[async_trait]
impl EntityStore for LocalTable<SubjectView> {
    type Draft = SubjectDraft;
    type Record = SubjectView;

    async fn list_all(&self) -> Result<Vec<SubjectView>, ServiceError> {
        Ok(self.repo.list_subjects().await?)
    }

    async fn create(&self, draft: &SubjectDraft) -> Result<SubjectView, ServiceError> {
        Ok(self.repo.create_subject(draft).await?)
    }

    async fn update(&self, id: &str, draft: &SubjectDraft) -> Result<SubjectView, ServiceError> {
        Ok(self.repo.update_subject(id, draft).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_subject(id).await?)
    }
}
