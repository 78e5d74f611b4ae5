//! Admin console core.
//!
//! Four list screens built on one generic [`EntityList`], mounted one at a
//! time by the [`AdminShell`]. Screens reach the catalog through a
//! [`CatalogBackend`]: [`LocalCatalog`] in-process, [`RemoteCatalog`] over
//! HTTP.
//!
//! Read failures are logged and swallowed (the screen shows what it has and
//! keeps the message in [`EntityList::load_error`]). Mutation failures are
//! returned to the caller as [`ConsoleError::Service`] with the list and the
//! open form untouched.

mod degrees;
mod departments;
mod list;
mod local;
mod remote;
mod semesters;
mod shell;
mod store;
mod subjects;

pub use degrees::DegreeManager;
pub use departments::DepartmentManager;
pub use list::{ConsoleError, EditState, EntityList, Row};
pub use local::{LocalCatalog, LocalTable};
pub use remote::{Collection, RemoteCatalog, RemoteTable};
pub use semesters::SemesterManager;
pub use shell::{AdminShell, AdminView, NavItem, Screen};
pub use store::{CatalogBackend, EntityStore, ServiceError};
pub use subjects::{group_key, DegreeGroup, SemesterGroup, SubjectManager};
