//! Subject screen.
//!
//! Subjects are fetched as one flat list ordered by code and regrouped for
//! display into degree → semester mapping → theory/practical buckets.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use super::list::EntityList;
use super::store::{CatalogBackend, EntityStore};
use crate::models::{DegreeView, SemesterView, SubjectDraft, SubjectKind, SubjectView};

/// Key of one semester group, also used as the add-form context.
pub fn group_key(degree_id: &str, semester_id: &str) -> String {
    format!("{}-{}", degree_id, semester_id)
}

/// One degree with its semester groups.
#[derive(Debug)]
pub struct DegreeGroup<'a> {
    pub degree: &'a DegreeView,
    pub collapsed: bool,
    pub semesters: Vec<SemesterGroup<'a>>,
}

/// One semester mapping of a degree with the subjects filed under it.
#[derive(Debug)]
pub struct SemesterGroup<'a> {
    pub key: String,
    pub semester: &'a SemesterView,
    pub collapsed: bool,
    /// The add form of the screen is open for this group
    pub adding: bool,
    pub subjects: Vec<&'a SubjectView>,
}

impl<'a> SemesterGroup<'a> {
    /// Heading of the group, e.g. "Semester 3".
    pub fn label(&self) -> String {
        self.semester.label()
    }

    fn of_kind(&self, kind: Option<SubjectKind>) -> Vec<&'a SubjectView> {
        self.subjects
            .iter()
            .copied()
            .filter(|subject| subject.subject.kind() == kind)
            .collect()
    }

    pub fn theory(&self) -> Vec<&'a SubjectView> {
        self.of_kind(Some(SubjectKind::Theory))
    }

    pub fn practical(&self) -> Vec<&'a SubjectView> {
        self.of_kind(Some(SubjectKind::Practical))
    }

    /// Subjects whose type matches neither bucket. They are not rendered.
    pub fn unclassified(&self) -> Vec<&'a SubjectView> {
        self.of_kind(None)
    }
}

pub struct SubjectManager<B: CatalogBackend> {
    subjects: EntityList<B::Subjects>,
    degree_store: B::Degrees,
    semester_store: B::Semesters,
    degrees: Vec<DegreeView>,
    semesters: Vec<SemesterView>,
    collapsed_degrees: HashMap<String, bool>,
    collapsed_semesters: HashMap<String, bool>,
}

impl<B: CatalogBackend> SubjectManager<B> {
    pub fn new(backend: &B) -> Self {
        Self {
            subjects: EntityList::new(backend.subjects()),
            degree_store: backend.degrees(),
            semester_store: backend.semesters(),
            degrees: Vec::new(),
            semesters: Vec::new(),
            collapsed_degrees: HashMap::new(),
            collapsed_semesters: HashMap::new(),
        }
    }

    /// Fetch subjects, degrees and semester mappings concurrently.
    ///
    /// Once all three settle, every degree starts expanded and every
    /// semester collapsed.
    pub async fn load(&mut self) {
        let (subjects, degrees, semesters) = tokio::join!(
            self.subjects.store().list_all(),
            self.degree_store.list_all(),
            self.semester_store.list_all()
        );

        self.subjects.settle(subjects);
        match degrees {
            Ok(degrees) => self.degrees = degrees,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load degrees");
                self.subjects.note_load_error(&err);
            }
        }
        match semesters {
            Ok(semesters) => self.semesters = semesters,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load semester mappings");
                self.subjects.note_load_error(&err);
            }
        }

        self.collapsed_degrees = self
            .degrees
            .iter()
            .map(|degree| (degree.degree.id.clone(), false))
            .collect();
        self.collapsed_semesters = self
            .semesters
            .iter()
            .map(|semester| {
                let key = group_key(&semester.mapping.degree_id, &semester.mapping.id);
                (key, true)
            })
            .collect();
    }

    pub fn degrees(&self) -> &[DegreeView] {
        &self.degrees
    }

    pub fn semesters(&self) -> &[SemesterView] {
        &self.semesters
    }

    /// Open the add form of one semester group, seeded with its ids.
    pub fn begin_add_to(&mut self, degree_id: &str, semester_id: &str) -> &mut SubjectDraft {
        let draft = SubjectDraft {
            degree_id: degree_id.to_string(),
            semester_id: semester_id.to_string(),
            ..SubjectDraft::default()
        };
        self.subjects
            .begin_add_with(Some(group_key(degree_id, semester_id)), draft)
    }

    pub fn is_degree_collapsed(&self, degree_id: &str) -> bool {
        self.collapsed_degrees
            .get(degree_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_semester_collapsed(&self, degree_id: &str, semester_id: &str) -> bool {
        self.collapsed_semesters
            .get(&group_key(degree_id, semester_id))
            .copied()
            .unwrap_or(true)
    }

    pub fn toggle_degree(&mut self, degree_id: &str) {
        let collapsed = self.is_degree_collapsed(degree_id);
        self.collapsed_degrees
            .insert(degree_id.to_string(), !collapsed);
    }

    pub fn toggle_semester(&mut self, degree_id: &str, semester_id: &str) {
        let collapsed = self.is_semester_collapsed(degree_id, semester_id);
        self.collapsed_semesters
            .insert(group_key(degree_id, semester_id), !collapsed);
    }

    /// Regroup the flat subject list for display.
    ///
    /// Degrees keep degree-list order and semesters keep mapping-list order.
    /// Subjects whose degree or mapping is not loaded appear in no group.
    pub fn groups(&self) -> Vec<DegreeGroup<'_>> {
        let adding_key = self.subjects.adding_key().flatten();

        self.degrees
            .iter()
            .map(|degree| {
                let degree_id = degree.degree.id.as_str();
                let semesters = self
                    .semesters
                    .iter()
                    .filter(|semester| semester.mapping.degree_id == degree_id)
                    .map(|semester| {
                        let key = group_key(degree_id, &semester.mapping.id);
                        let subjects = self
                            .subjects
                            .records()
                            .iter()
                            .filter(|subject| {
                                subject.subject.degree_id == degree_id
                                    && subject.subject.semester_id == semester.mapping.id
                            })
                            .collect();
                        SemesterGroup {
                            collapsed: self.is_semester_collapsed(degree_id, &semester.mapping.id),
                            adding: adding_key == Some(key.as_str()),
                            key,
                            semester,
                            subjects,
                        }
                    })
                    .collect();

                DegreeGroup {
                    degree,
                    collapsed: self.is_degree_collapsed(degree_id),
                    semesters,
                }
            })
            .collect()
    }
}

impl<B: CatalogBackend> Deref for SubjectManager<B> {
    type Target = EntityList<B::Subjects>;

    fn deref(&self) -> &Self::Target {
        &self.subjects
    }
}

impl<B: CatalogBackend> DerefMut for SubjectManager<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.subjects
    }
}
