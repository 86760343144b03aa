//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O.

use mhub_core::api::SessionFilter;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch sessions for the given filter as a lifecycle-tracked task.
    FetchSessions { task: TaskId, filter: SessionFilter },

    /// Cancel an in-flight task (superseded fetch).
    CancelTask { token: CancellationToken },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
