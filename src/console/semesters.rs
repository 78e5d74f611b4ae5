//! Semester mapping screen: mappings plus the degree selection list.

use std::ops::{Deref, DerefMut};

use super::list::EntityList;
use super::store::{CatalogBackend, EntityStore};
use crate::models::DegreeView;

pub struct SemesterManager<B: CatalogBackend> {
    semesters: EntityList<B::Semesters>,
    degree_store: B::Degrees,
    degrees: Vec<DegreeView>,
}

impl<B: CatalogBackend> SemesterManager<B> {
    pub fn new(backend: &B) -> Self {
        Self {
            semesters: EntityList::new(backend.semesters()),
            degree_store: backend.degrees(),
            degrees: Vec::new(),
        }
    }

    /// Fetch mappings and degrees concurrently; ready once both settle.
    pub async fn load(&mut self) {
        let (semesters, degrees) = tokio::join!(
            self.semesters.store().list_all(),
            self.degree_store.list_all()
        );

        self.semesters.settle(semesters);
        match degrees {
            Ok(degrees) => self.degrees = degrees,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load degrees");
                self.semesters.note_load_error(&err);
            }
        }
    }

    /// Degrees offered in the mapping form.
    pub fn degrees(&self) -> &[DegreeView] {
        &self.degrees
    }
}

impl<B: CatalogBackend> Deref for SemesterManager<B> {
    type Target = EntityList<B::Semesters>;

    fn deref(&self) -> &Self::Target {
        &self.semesters
    }
}

impl<B: CatalogBackend> DerefMut for SemesterManager<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.semesters
    }
}
