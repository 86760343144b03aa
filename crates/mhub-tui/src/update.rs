//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use mhub_core::api::{SessionFilter, UserRole};

use crate::effects::UiEffect;
use crate::events::{SessionUiEvent, UiEvent};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => match term_event {
            Event::Key(key) => handle_key(app, key),
            _ => vec![],
        },
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // A newer fetch superseded this one; drop the stale result.
                vec![]
            }
        }
        UiEvent::Session(session_event) => match session_event {
            SessionUiEvent::FetchLoaded { sessions } => {
                app.list.sessions = sessions;
                app.list.clamp_selection();
                app.list.loading = false;
                vec![]
            }
            SessionUiEvent::FetchFailed { error } => {
                // Deliberate policy: failures are logged, never shown. The
                // previously held sessions stay in place.
                tracing::warn!(filter = %app.list.filter, %error, "session fetch failed");
                app.list.loading = false;
                vec![]
            }
        },
    }
}

/// Starts a fetch for the given filter.
///
/// Cancels a still-in-flight fetch first; its completion would be discarded
/// by the task id check anyway, but cancelling stops the socket work early.
pub fn start_fetch(app: &mut AppState, filter: SessionFilter) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if let Some(token) = app.tasks.sessions_fetch.cancel.clone() {
        effects.push(UiEffect::CancelTask { token });
    }

    app.list.filter = filter;
    app.list.loading = true;

    let task = app.task_seq.next_id();
    effects.push(UiEffect::FetchSessions { task, filter });
    effects
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],

        // Filter bar: cycle with Tab/arrows, or jump with 1-4. Selecting the
        // already-active filter re-triggers the fetch, which doubles as a
        // refresh.
        KeyCode::Tab | KeyCode::Right => start_fetch(app, app.list.filter.next()),
        KeyCode::BackTab | KeyCode::Left => start_fetch(app, app.list.filter.prev()),
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as u8 - b'1') as usize;
            start_fetch(app, SessionFilter::ALL[index])
        }
        KeyCode::Char('r') => start_fetch(app, app.list.filter),

        KeyCode::Up | KeyCode::Char('k') => {
            if app.list.selected > 0 {
                app.list.selected -= 1;
                if app.list.selected < app.list.scroll_offset {
                    app.list.scroll_offset = app.list.selected;
                }
            }
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.list.selected + 1 < app.list.sessions.len() {
                app.list.selected += 1;
            }
            vec![]
        }

        // Open the selected session's details page.
        KeyCode::Enter => {
            if app.list.loading {
                return vec![];
            }
            let Some(session) = app.list.selected_session() else {
                return vec![];
            };
            open_web_path(app, &format!("sessions/{}", session.id))
        }

        // Discovery page, the empty-state call-to-action for mentees.
        KeyCode::Char('s') => {
            if app.viewer.role != UserRole::Mentee {
                return vec![];
            }
            open_web_path(app, "search")
        }

        _ => vec![],
    }
}

fn open_web_path(app: &AppState, path: &str) -> Vec<UiEffect> {
    match app.config.web_url(path) {
        Ok(url) => vec![UiEffect::OpenBrowser {
            url: url.to_string(),
        }],
        Err(error) => {
            tracing::warn!(%error, path, "could not build web URL");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mhub_core::api::{AuthUser, Participant, Session, SessionStatus};
    use mhub_core::config::Config;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

    fn viewer(role: &str) -> AuthUser {
        serde_json::from_value(serde_json::json!({ "name": "Sam", "role": role })).unwrap()
    }

    fn app(role: &str) -> AppState {
        AppState::new(Config::default(), viewer(role))
    }

    fn session(id: &str, status: SessionStatus) -> Session {
        Session {
            id: id.to_string(),
            title: format!("Session {id}"),
            description: None,
            status,
            scheduled_at: Utc.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap(),
            duration: Some(60),
            mentor: Some(Participant {
                name: "Grace".to_string(),
            }),
            mentee: Some(Participant {
                name: "Ada".to_string(),
            }),
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn complete_fetch(app: &mut AppState, id: TaskId, sessions: Vec<Session>) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SessionsFetch,
                completed: TaskCompleted {
                    id,
                    result: Box::new(UiEvent::Session(SessionUiEvent::FetchLoaded { sessions })),
                },
            },
        )
    }

    fn start_task(app: &mut AppState, id: TaskId) {
        update(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::SessionsFetch,
                started: TaskStarted { id, cancel: None },
            },
        );
    }

    #[test]
    fn test_filter_key_triggers_fetch() {
        let mut app = app("Mentee");

        let effects = update(&mut app, key(KeyCode::Char('2')));

        assert_eq!(app.list.filter, SessionFilter::Upcoming);
        assert!(app.list.loading);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::FetchSessions {
                filter: SessionFilter::Upcoming,
                ..
            }
        )));
    }

    #[test]
    fn test_tab_cycles_filters() {
        let mut app = app("Mentee");
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.list.filter, SessionFilter::Upcoming);
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.list.filter, SessionFilter::Scheduled);
        update(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.list.filter, SessionFilter::Upcoming);
    }

    #[test]
    fn test_reselecting_active_filter_refetches() {
        let mut app = app("Mentee");
        update(&mut app, key(KeyCode::Char('1')));

        let effects = update(&mut app, key(KeyCode::Char('1')));

        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::FetchSessions {
                filter: SessionFilter::All,
                ..
            }
        )));
    }

    #[test]
    fn test_fetch_loaded_replaces_sessions() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));

        complete_fetch(
            &mut app,
            TaskId(0),
            vec![session("a", SessionStatus::Scheduled)],
        );

        assert!(!app.list.loading);
        assert_eq!(app.list.sessions.len(), 1);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));
        // A second fetch supersedes the first before it completes.
        start_task(&mut app, TaskId(1));

        complete_fetch(
            &mut app,
            TaskId(0),
            vec![session("stale", SessionStatus::Scheduled)],
        );

        assert!(app.list.loading, "stale result must not settle the view");
        assert!(app.list.sessions.is_empty());

        complete_fetch(
            &mut app,
            TaskId(1),
            vec![session("fresh", SessionStatus::Scheduled)],
        );
        assert!(!app.list.loading);
        assert_eq!(app.list.sessions[0].id, "fresh");
    }

    #[test]
    fn test_fetch_failure_keeps_previous_sessions() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));
        complete_fetch(
            &mut app,
            TaskId(0),
            vec![session("kept", SessionStatus::Completed)],
        );

        update(&mut app, key(KeyCode::Char('r')));
        start_task(&mut app, TaskId(1));
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SessionsFetch,
                completed: TaskCompleted {
                    id: TaskId(1),
                    result: Box::new(UiEvent::Session(SessionUiEvent::FetchFailed {
                        error: "connection refused".to_string(),
                    })),
                },
            },
        );

        assert!(!app.list.loading);
        assert_eq!(app.list.sessions.len(), 1);
        assert_eq!(app.list.sessions[0].id, "kept");
    }

    #[test]
    fn test_new_fetch_cancels_in_flight_one() {
        let mut app = app("Mentee");
        let token = tokio_util::sync::CancellationToken::new();
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::SessionsFetch,
                started: TaskStarted {
                    id: TaskId(0),
                    cancel: Some(token.clone()),
                },
            },
        );

        let effects = update(&mut app, key(KeyCode::Char('3')));

        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, UiEffect::CancelTask { .. }))
        );
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));
        complete_fetch(
            &mut app,
            TaskId(0),
            vec![
                session("a", SessionStatus::Scheduled),
                session("b", SessionStatus::Completed),
            ],
        );

        update(&mut app, key(KeyCode::Down));
        assert_eq!(app.list.selected, 1);
        update(&mut app, key(KeyCode::Down));
        assert_eq!(app.list.selected, 1, "selection stops at the last card");
        update(&mut app, key(KeyCode::Up));
        assert_eq!(app.list.selected, 0);
    }

    #[test]
    fn test_selection_clamps_when_list_shrinks() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));
        complete_fetch(
            &mut app,
            TaskId(0),
            vec![
                session("a", SessionStatus::Scheduled),
                session("b", SessionStatus::Completed),
            ],
        );
        update(&mut app, key(KeyCode::Down));

        start_task(&mut app, TaskId(1));
        complete_fetch(
            &mut app,
            TaskId(1),
            vec![session("only", SessionStatus::Scheduled)],
        );

        assert_eq!(app.list.selected, 0);
    }

    #[test]
    fn test_enter_opens_session_details() {
        let mut app = app("Mentee");
        start_task(&mut app, TaskId(0));
        complete_fetch(
            &mut app,
            TaskId(0),
            vec![session("abc123", SessionStatus::Scheduled)],
        );

        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::OpenBrowser { url } if url.ends_with("/sessions/abc123")
        )));
    }

    #[test]
    fn test_search_key_only_for_mentees() {
        let mut mentee = app("Mentee");
        let effects = update(&mut mentee, key(KeyCode::Char('s')));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::OpenBrowser { url } if url.ends_with("/search")
        )));

        let mut mentor = app("Mentor");
        let effects = update(&mut mentor, key(KeyCode::Char('s')));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("Mentor");
        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert!(matches!(effects[0], UiEffect::Quit));

        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects[0], UiEffect::Quit));
    }
}
