//! Admin shell: a navigation rail and exactly one mounted screen.

use serde::{Deserialize, Serialize};

use super::degrees::DegreeManager;
use super::departments::DepartmentManager;
use super::semesters::SemesterManager;
use super::store::CatalogBackend;
use super::subjects::SubjectManager;

/// Screens reachable from the navigation rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminView {
    #[default]
    Departments,
    Degrees,
    Semesters,
    Subjects,
}

impl AdminView {
    /// Rail order.
    pub const ALL: [AdminView; 4] = [
        AdminView::Departments,
        AdminView::Degrees,
        AdminView::Semesters,
        AdminView::Subjects,
    ];

    pub fn label(self, collapsed: bool) -> &'static str {
        match (self, collapsed) {
            (AdminView::Departments, false) => "Departments",
            (AdminView::Departments, true) => "Dept",
            (AdminView::Degrees, false) => "Degrees",
            (AdminView::Degrees, true) => "Deg",
            (AdminView::Semesters, false) => "Semesters",
            (AdminView::Semesters, true) => "Sem",
            (AdminView::Subjects, false) => "Subjects",
            (AdminView::Subjects, true) => "Sub",
        }
    }
}

/// One entry of the navigation rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub view: AdminView,
    pub label: &'static str,
    pub active: bool,
}

/// The mounted screen and all of its state.
pub enum Screen<B: CatalogBackend> {
    Departments(DepartmentManager<B>),
    Degrees(DegreeManager<B>),
    Semesters(SemesterManager<B>),
    Subjects(SubjectManager<B>),
}

impl<B: CatalogBackend> Screen<B> {
    fn mount(view: AdminView, backend: &B) -> Self {
        match view {
            AdminView::Departments => Screen::Departments(DepartmentManager::new(backend)),
            AdminView::Degrees => Screen::Degrees(DegreeManager::new(backend)),
            AdminView::Semesters => Screen::Semesters(SemesterManager::new(backend)),
            AdminView::Subjects => Screen::Subjects(SubjectManager::new(backend)),
        }
    }

    pub fn view(&self) -> AdminView {
        match self {
            Screen::Departments(_) => AdminView::Departments,
            Screen::Degrees(_) => AdminView::Degrees,
            Screen::Semesters(_) => AdminView::Semesters,
            Screen::Subjects(_) => AdminView::Subjects,
        }
    }

    pub async fn load(&mut self) {
        match self {
            Screen::Departments(manager) => manager.load().await,
            Screen::Degrees(manager) => manager.load().await,
            Screen::Semesters(manager) => manager.load().await,
            Screen::Subjects(manager) => manager.load().await,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Screen::Departments(manager) => manager.is_loading(),
            Screen::Degrees(manager) => manager.is_loading(),
            Screen::Semesters(manager) => manager.is_loading(),
            Screen::Subjects(manager) => manager.is_loading(),
        }
    }
}

/// Sidebar-driven view switcher.
///
/// Switching views drops the mounted screen with its records and any open
/// form; the new screen fetches everything again.
pub struct AdminShell<B: CatalogBackend> {
    backend: B,
    collapsed: bool,
    screen: Screen<B>,
}

impl<B: CatalogBackend> AdminShell<B> {
    /// Shell with the departments screen mounted but not yet loaded.
    pub fn new(backend: B) -> Self {
        let screen = Screen::mount(AdminView::default(), &backend);
        Self {
            backend,
            collapsed: false,
            screen,
        }
    }

    /// Shell with the departments screen mounted and loaded.
    pub async fn open(backend: B) -> Self {
        let mut shell = Self::new(backend);
        shell.screen.load().await;
        shell
    }

    pub fn active_view(&self) -> AdminView {
        self.screen.view()
    }

    pub fn screen(&self) -> &Screen<B> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen<B> {
        &mut self.screen
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        let active = self.active_view();
        AdminView::ALL
            .iter()
            .map(|&view| NavItem {
                view,
                label: view.label(self.collapsed),
                active: view == active,
            })
            .collect()
    }

    /// Mount and load `view`. Selecting the active view keeps it as is.
    pub async fn switch_to(&mut self, view: AdminView) {
        if view == self.active_view() {
            return;
        }

        tracing::debug!(?view, "switching admin view");
        self.screen = Screen::mount(view, &self.backend);
        self.screen.load().await;
    }
}
