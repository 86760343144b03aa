//! Application state.
//!
//! `AppState` is owned by the runtime and mutated only by the reducer in
//! `update`. Rendering reads it immutably.

use mhub_core::api::{AuthUser, Session, SessionFilter};
use mhub_core::config::Config;

use crate::common::{TaskSeq, Tasks};

/// State of the session list view.
///
/// `sessions` always holds the result of the most recently completed fetch
/// for the current filter. A failed fetch leaves it untouched; `loading`
/// still clears.
#[derive(Debug)]
pub struct SessionListState {
    /// Sessions from the last successful fetch.
    pub sessions: Vec<Session>,
    /// True from startup/filter-change until the fetch settles.
    pub loading: bool,
    /// The active filter.
    pub filter: SessionFilter,
    /// Index of the highlighted card.
    pub selected: usize,
    /// First visible card (for scrolling long lists).
    pub scroll_offset: usize,
}

impl SessionListState {
    pub fn new(filter: SessionFilter) -> Self {
        Self {
            sessions: Vec::new(),
            loading: true,
            filter,
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Keeps the selection inside the current list.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.sessions.len().saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    pub fn selected_session(&self) -> Option<&Session> {
        self.sessions.get(self.selected)
    }
}

/// Combined TUI state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// The authenticated user, injected at startup.
    pub viewer: AuthUser,
    /// Loaded configuration.
    pub config: Config,
    /// Session list view state.
    pub list: SessionListState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: Config, viewer: AuthUser) -> Self {
        let filter = config.ui.default_filter;
        Self {
            should_quit: false,
            viewer,
            config,
            list: SessionListState::new(filter),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }
}
