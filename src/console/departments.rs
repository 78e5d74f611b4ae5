//! Department screen.

use std::ops::{Deref, DerefMut};

use super::list::EntityList;
use super::store::CatalogBackend;

/// Manages the department list. Departments reference nothing, so there are
/// no lookups to load.
pub struct DepartmentManager<B: CatalogBackend> {
    departments: EntityList<B::Departments>,
}

impl<B: CatalogBackend> DepartmentManager<B> {
    pub fn new(backend: &B) -> Self {
        Self {
            departments: EntityList::new(backend.departments()),
        }
    }

    pub async fn load(&mut self) {
        self.departments.load().await;
    }
}

impl<B: CatalogBackend> Deref for DepartmentManager<B> {
    type Target = EntityList<B::Departments>;

    fn deref(&self) -> &Self::Target {
        &self.departments
    }
}

impl<B: CatalogBackend> DerefMut for DepartmentManager<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.departments
    }
}
