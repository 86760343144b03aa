//! Session fetch handler.

use std::sync::Arc;

use mhub_core::api::{ApiClient, SessionFilter};
use tokio_util::sync::CancellationToken;

use crate::events::{SessionUiEvent, UiEvent};

/// Fetches sessions for a filter, racing against cancellation.
///
/// Cancellation produces a `FetchFailed` result; the reducer has already
/// moved past this task by then, so the completion is discarded either way.
pub async fn sessions_fetch(
    client: Arc<ApiClient>,
    filter: SessionFilter,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let fetch = client.fetch_sessions(filter);

    let result = match cancel {
        Some(token) => {
            tokio::select! {
                () = token.cancelled() => Err(anyhow::anyhow!("fetch cancelled")),
                result = fetch => result,
            }
        }
        None => fetch.await,
    };

    match result {
        Ok(sessions) => UiEvent::Session(SessionUiEvent::FetchLoaded { sessions }),
        Err(error) => UiEvent::Session(SessionUiEvent::FetchFailed {
            error: format!("{error:#}"),
        }),
    }
}
