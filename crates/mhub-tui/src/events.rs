//! UI event types.
//!
//! All inputs to the TUI (terminal events, async fetch results) are converted
//! to `UiEvent` before being processed by the reducer.
//!
//! Async work uses a uniform task lifecycle:
//! - the runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - the runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - the reducer is the only place that mutates `TaskState`
//!
//! A `TaskCompleted` whose id no longer matches the active task is dropped by
//! the reducer, which is what makes stale fetch responses harmless.

use crossterm::event::Event as CrosstermEvent;
use mhub_core::api::Session;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Result events for session fetches.
#[derive(Debug)]
pub enum SessionUiEvent {
    /// Fetch succeeded; carries the full replacement list.
    FetchLoaded { sessions: Vec<Session> },

    /// Fetch failed. Logged, never surfaced in the UI.
    FetchFailed { error: String },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, render cadence).
    Tick,

    /// Terminal input event (key, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime started a task (cancel token optional).
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Session fetch results.
    Session(SessionUiEvent),
}
