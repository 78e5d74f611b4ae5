//! Degree screen: degrees plus the department selection list.

use std::ops::{Deref, DerefMut};

use super::list::EntityList;
use super::store::{CatalogBackend, EntityStore};
use crate::models::Department;

pub struct DegreeManager<B: CatalogBackend> {
    degrees: EntityList<B::Degrees>,
    department_store: B::Departments,
    departments: Vec<Department>,
}

impl<B: CatalogBackend> DegreeManager<B> {
    pub fn new(backend: &B) -> Self {
        Self {
            degrees: EntityList::new(backend.degrees()),
            department_store: backend.departments(),
            departments: Vec::new(),
        }
    }

    /// Fetch degrees and departments concurrently; ready once both settle.
    pub async fn load(&mut self) {
        let (degrees, departments) = tokio::join!(
            self.degrees.store().list_all(),
            self.department_store.list_all()
        );

        self.degrees.settle(degrees);
        match departments {
            Ok(departments) => self.departments = departments,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load departments");
                self.degrees.note_load_error(&err);
            }
        }
    }

    /// Departments offered in the degree form.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }
}

impl<B: CatalogBackend> Deref for DegreeManager<B> {
    type Target = EntityList<B::Degrees>;

    fn deref(&self) -> &Self::Target {
        &self.degrees
    }
}

impl<B: CatalogBackend> DerefMut for DegreeManager<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.degrees
    }
}
