//! Generic entity-list manager.
//!
//! Holds the in-memory copy of one entity's records plus the add/edit state
//! machine shared by every screen. At most one form is open at a time: the
//! draft lives inside [`EditState`], so opening a new form replaces the old
//! one and its draft.

use thiserror::Error;

use super::store::{EntityStore, ServiceError};
use crate::models::{Draft, Record};

/// Add/edit state of a list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState<D> {
    #[default]
    Idle,
    /// A blank form is open; `key` names the context it belongs to, if any.
    Adding { key: Option<String>, draft: D },
    /// The row `id` is replaced by a form pre-filled from its values.
    Editing { id: String, draft: D },
}

impl<D> EditState<D> {
    pub fn draft(&self) -> Option<&D> {
        match self {
            EditState::Idle => None,
            EditState::Adding { draft, .. } | EditState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            EditState::Idle => None,
            EditState::Adding { draft, .. } | EditState::Editing { draft, .. } => Some(draft),
        }
    }
}

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    /// Submission is disabled until the field is filled in.
    #[error("{0} is required")]
    Incomplete(&'static str),
    #[error("no {0} form is open")]
    NoOpenForm(&'static str),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// A row as it should be shown.
#[derive(Debug, PartialEq)]
pub enum Row<'a, R, D> {
    Display(&'a R),
    /// Edit form standing in for the record being edited
    Form { record: &'a R, draft: &'a D },
}

/// In-memory list of one entity, synchronized with its store.
pub struct EntityList<S: EntityStore> {
    store: S,
    records: Vec<S::Record>,
    state: EditState<S::Draft>,
    loading: bool,
    load_error: Option<String>,
}

impl<S: EntityStore> EntityList<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
            state: EditState::Idle,
            loading: true,
            load_error: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&S::Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failed read, kept for display.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn state(&self) -> &EditState<S::Draft> {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Context key of the open add form. `Some(None)` for an unkeyed form.
    pub fn adding_key(&self) -> Option<Option<&str>> {
        match &self.state {
            EditState::Adding { key, .. } => Some(key.as_deref()),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&S::Draft> {
        self.state.draft()
    }

    /// Mutable access to the open form's fields.
    pub fn draft_mut(&mut self) -> Option<&mut S::Draft> {
        self.state.draft_mut()
    }

    /// Fetch this entity's records on its own.
    pub async fn load(&mut self) {
        let result = self.store.list_all().await;
        self.settle(result);
    }

    /// Apply the outcome of a read-all and mark the list ready.
    ///
    /// Failures are logged and swallowed; the list keeps what it had.
    pub fn settle(&mut self, result: Result<Vec<S::Record>, ServiceError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.load_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load list");
                self.load_error = Some(err.message().to_string());
            }
        }
        self.loading = false;
    }

    /// Record a failed lookup read against this list.
    pub(crate) fn note_load_error(&mut self, err: &ServiceError) {
        self.load_error = Some(err.message().to_string());
    }

    /// Open an empty add form, closing any other form.
    pub fn begin_add(&mut self, key: Option<String>) -> &mut S::Draft {
        self.begin_add_with(key, S::Draft::default())
    }

    /// Open an add form seeded with `draft`, closing any other form.
    pub fn begin_add_with(&mut self, key: Option<String>, draft: S::Draft) -> &mut S::Draft {
        self.state = EditState::Adding { key, draft };
        match &mut self.state {
            EditState::Adding { draft, .. } => draft,
            _ => unreachable!("state was just set to Adding"),
        }
    }

    /// Open the edit form for `id`, closing any other form.
    ///
    /// Returns false and leaves the state alone when `id` is not listed.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find(id) else {
            return false;
        };
        let draft = record.to_draft();
        self.state = EditState::Editing {
            id: id.to_string(),
            draft,
        };
        true
    }

    /// Close any open form, discarding its draft.
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    pub fn validate(draft: &S::Draft) -> bool {
        draft.is_complete()
    }

    /// Whether the submit control of the open form is enabled.
    pub fn can_submit(&self) -> bool {
        self.draft().is_some_and(Self::validate)
    }

    /// Submit the add form. On success the canonical record is appended.
    ///
    /// On failure the form stays open with its draft and the list is unchanged.
    pub async fn create(&mut self) -> Result<&S::Record, ConsoleError> {
        let EditState::Adding { draft, .. } = &self.state else {
            return Err(ConsoleError::NoOpenForm("add"));
        };
        if let Some(field) = draft.missing_field() {
            return Err(ConsoleError::Incomplete(field));
        }

        let created = self.store.create(draft).await?;
        tracing::debug!(id = created.id(), "record created");

        self.state = EditState::Idle;
        self.records.push(created);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Submit the edit form. On success the row is replaced in place.
    ///
    /// On failure the form stays open with its draft and the list is unchanged.
    pub async fn update(&mut self) -> Result<&S::Record, ConsoleError> {
        let EditState::Editing { id, draft } = &self.state else {
            return Err(ConsoleError::NoOpenForm("edit"));
        };
        if let Some(field) = draft.missing_field() {
            return Err(ConsoleError::Incomplete(field));
        }

        let updated = self.store.update(id, draft).await?;
        tracing::debug!(id = updated.id(), "record updated");

        self.state = EditState::Idle;
        let position = self
            .records
            .iter()
            .position(|record| record.id() == updated.id());
        let index = match position {
            Some(index) => {
                self.records[index] = updated;
                index
            }
            None => {
                self.records.push(updated);
                self.records.len() - 1
            }
        };
        Ok(&self.records[index])
    }

    /// Delete `id`. Returns whether a listed record was removed.
    ///
    /// An id that is not listed issues no request and changes nothing.
    pub async fn remove(&mut self, id: &str) -> Result<bool, ConsoleError> {
        if self.find(id).is_none() {
            tracing::debug!(%id, "remove skipped, record not listed");
            return Ok(false);
        }

        self.store.delete(id).await?;

        self.records.retain(|record| record.id() != id);
        if self.editing_id() == Some(id) {
            self.state = EditState::Idle;
        }
        Ok(true)
    }

    /// Rows in list order, with the edited record shown as its form.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_, S::Record, S::Draft>> + '_ {
        self.records.iter().map(move |record| match &self.state {
            EditState::Editing { id, draft } if id == record.id() => Row::Form { record, draft },
            _ => Row::Display(record),
        })
    }

    /// Draft of the open add form, if any.
    pub fn add_form(&self) -> Option<&S::Draft> {
        match &self.state {
            EditState::Adding { draft, .. } => Some(draft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, DepartmentDraft};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Department store kept in memory, with a switch to make every call fail.
    #[derive(Clone, Default)]
    struct MemoryStore {
        rows: Arc<Mutex<Vec<Department>>>,
        failing: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
        next_id: Arc<AtomicUsize>,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::new("service unavailable"));
            }
            Ok(())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EntityStore for MemoryStore {
        type Draft = DepartmentDraft;
        type Record = Department;

        async fn list_all(&self) -> Result<Vec<Department>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, draft: &DepartmentDraft) -> Result<Department, ServiceError> {
            self.check()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let record = Department {
                id: format!("dep-{}", n),
                name: draft.name.clone(),
                created_at: format!("2026-01-01T00:00:{:02}.000000Z", n),
            };
            self.rows.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: &str, draft: &DepartmentDraft) -> Result<Department, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| ServiceError::new(format!("Department {} not found", id)))?;
            row.name = draft.name.clone();
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), ServiceError> {
            self.check()?;
            self.rows.lock().unwrap().retain(|row| row.id != id);
            Ok(())
        }
    }

    async fn seeded(names: &[&str]) -> (EntityList<MemoryStore>, MemoryStore) {
        let store = MemoryStore::default();
        for name in names {
            store.create(&DepartmentDraft::new(*name)).await.unwrap();
        }
        let mut list = EntityList::new(store.clone());
        list.load().await;
        (list, store)
    }

    #[tokio::test]
    async fn test_load_clears_loading_flag() {
        let store = MemoryStore::default();
        let mut list = EntityList::new(store);
        assert!(list.is_loading());

        list.load().await;
        assert!(!list.is_loading());
        assert!(list.records().is_empty());
        assert_eq!(list.state(), &EditState::Idle);
    }

    #[tokio::test]
    async fn test_load_failure_is_swallowed() {
        let (mut list, store) = seeded(&["Physics"]).await;
        store.failing.store(true, Ordering::SeqCst);

        list.load().await;

        assert!(!list.is_loading());
        assert_eq!(list.records().len(), 1);
        assert_eq!(list.load_error(), Some("service unavailable"));
    }

    #[tokio::test]
    async fn test_single_form_at_a_time() {
        let (mut list, _store) = seeded(&["Physics", "Chemistry"]).await;
        let first = list.records()[0].id.clone();
        let second = list.records()[1].id.clone();

        list.begin_add(None).name = "Biology".to_string();
        assert!(list.add_form().is_some());

        assert!(list.begin_edit(&first));
        assert_eq!(list.editing_id(), Some(first.as_str()));
        assert!(list.add_form().is_none());

        assert!(list.begin_edit(&second));
        assert_eq!(list.editing_id(), Some(second.as_str()));
        let forms = list
            .rows()
            .filter(|row| matches!(row, Row::Form { .. }))
            .count();
        assert_eq!(forms, 1);

        list.begin_add(Some("ctx".to_string()));
        assert_eq!(list.editing_id(), None);
        assert_eq!(list.adding_key(), Some(Some("ctx")));
        assert_eq!(list.draft(), Some(&DepartmentDraft::default()));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id_keeps_state() {
        let (mut list, _store) = seeded(&["Physics"]).await;
        list.begin_add(None);

        assert!(!list.begin_edit("missing"));
        assert!(list.add_form().is_some());
    }

    #[tokio::test]
    async fn test_incomplete_draft_blocks_submission() {
        let (mut list, store) = seeded(&[]).await;
        let calls_before = store.calls();

        list.begin_add(None).name = "  ".to_string();
        assert!(!list.can_submit());

        let err = list.create().await.unwrap_err();
        assert_eq!(err, ConsoleError::Incomplete("Department name"));
        assert_eq!(store.calls(), calls_before);
        assert!(list.add_form().is_some());
    }

    #[tokio::test]
    async fn test_create_appends_and_returns_to_idle() {
        let (mut list, _store) = seeded(&["Physics"]).await;

        list.begin_add(None).name = "Mathematics".to_string();
        assert!(list.can_submit());
        let created = list.create().await.unwrap().clone();

        assert_eq!(created.name, "Mathematics");
        assert_eq!(list.records().last(), Some(&created));
        assert_eq!(list.state(), &EditState::Idle);
    }

    #[tokio::test]
    async fn test_create_round_trips_through_reload() {
        let (mut list, store) = seeded(&[]).await;
        let draft = DepartmentDraft::new("History");
        *list.begin_add(None) = draft.clone();
        list.create().await.unwrap();

        let mut fresh = EntityList::new(store);
        fresh.load().await;
        assert!(fresh.records().iter().any(|r| r.to_draft() == draft));
    }

    #[tokio::test]
    async fn test_create_failure_preserves_draft() {
        let (mut list, store) = seeded(&["Physics"]).await;
        list.begin_add(None).name = "Geology".to_string();
        store.failing.store(true, Ordering::SeqCst);

        let err = list.create().await.unwrap_err();

        assert_eq!(
            err,
            ConsoleError::Service(ServiceError::new("service unavailable"))
        );
        assert_eq!(list.records().len(), 1);
        assert_eq!(list.add_form(), Some(&DepartmentDraft::new("Geology")));
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (mut list, _store) = seeded(&["Physics", "Chemistry"]).await;
        let id = list.records()[0].id.clone();

        list.begin_edit(&id);
        assert_eq!(list.draft(), Some(&DepartmentDraft::new("Physics")));
        list.draft_mut().unwrap().name = "Applied Physics".to_string();
        list.update().await.unwrap();

        assert_eq!(list.records()[0].name, "Applied Physics");
        assert_eq!(list.records()[1].name, "Chemistry");
        assert_eq!(list.state(), &EditState::Idle);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_form_open() {
        let (mut list, store) = seeded(&["Physics"]).await;
        let id = list.records()[0].id.clone();
        list.begin_edit(&id);
        list.draft_mut().unwrap().name = "Astro".to_string();
        store.failing.store(true, Ordering::SeqCst);

        assert!(matches!(
            list.update().await,
            Err(ConsoleError::Service(_))
        ));
        assert_eq!(list.records()[0].name, "Physics");
        assert_eq!(list.editing_id(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_submit_without_form() {
        let (mut list, _store) = seeded(&[]).await;
        assert_eq!(
            list.create().await.unwrap_err(),
            ConsoleError::NoOpenForm("add")
        );
        assert_eq!(
            list.update().await.unwrap_err(),
            ConsoleError::NoOpenForm("edit")
        );
    }

    #[tokio::test]
    async fn test_remove_twice_is_noop() {
        let (mut list, store) = seeded(&["Physics", "Chemistry"]).await;
        let id = list.records()[0].id.clone();

        assert!(list.remove(&id).await.unwrap());
        let after_first: Vec<Department> = list.records().to_vec();
        let calls = store.calls();

        assert!(!list.remove(&id).await.unwrap());
        assert_eq!(list.records(), after_first.as_slice());
        assert_eq!(store.calls(), calls);
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_record() {
        let (mut list, store) = seeded(&["Physics"]).await;
        let id = list.records()[0].id.clone();
        store.failing.store(true, Ordering::SeqCst);

        assert!(list.remove(&id).await.is_err());
        assert_eq!(list.records().len(), 1);
    }

    #[tokio::test]
    async fn test_removing_edited_row_closes_form() {
        let (mut list, _store) = seeded(&["Physics"]).await;
        let id = list.records()[0].id.clone();
        list.begin_edit(&id);

        list.remove(&id).await.unwrap();
        assert_eq!(list.state(), &EditState::Idle);
    }
}
