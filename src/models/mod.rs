//! Data models for the academic catalog.
//!
//! Canonical records carry foreign keys only. The `*View` types are read
//! models: the canonical record plus parent display names resolved by a join
//! at read time. Drafts hold the editable fields of an add or edit form and
//! are what gets sent on create and update, so display names never travel
//! back to the store.

mod degree;
mod department;
mod semester;
mod subject;

pub use degree::*;
pub use department::*;
pub use semester::*;
pub use subject::*;

/// Editable field set of an entity.
pub trait Draft: Clone + Default + PartialEq + Send + Sync {
    /// Label of the first required field that is empty or zero, if any.
    ///
    /// Parent existence is not checked here.
    fn missing_field(&self) -> Option<&'static str>;

    fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}

/// A listed record that can be edited through a [`Draft`].
pub trait Record: Clone + Send + Sync {
    type Draft: Draft;

    fn id(&self) -> &str;

    /// Copy of the record's current editable fields.
    fn to_draft(&self) -> Self::Draft;
}

/// True when the field holds something other than whitespace.
pub(crate) fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}
