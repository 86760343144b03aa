//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use mhub_core::api::{Session, SessionFilter, SessionStatus, UserRole, format_schedule};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::state::AppState;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Width of the stats/tips sidebar.
const SIDEBAR_WIDTH: u16 = 30;

/// Height of the header (title + subtitle).
const HEADER_HEIGHT: u16 = 2;

/// Height of the filter bar.
const FILTER_BAR_HEIGHT: u16 = 1;

/// Height of the key hint row at the bottom.
const HINT_HEIGHT: u16 = 1;

const MENTEE_TIPS: &[&str] = &[
    "Prepare questions before each session",
    "Take notes and review them afterwards",
    "Give your mentor feedback on what helped",
];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    // Loading short-circuits everything else.
    if app.list.loading {
        render_loading(app, frame, area);
        return;
    }

    if app.list.sessions.is_empty() {
        render_empty_state(app, frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(HINT_HEIGHT),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    render_filter_bar(app, frame, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[2]);

    render_session_list(app, frame, body[0]);
    render_sidebar(app, frame, body[1]);

    render_hints(frame, chunks[3]);
}

fn render_loading(app: &AppState, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::raw(" Loading sessions..."),
    ]);

    let vertical_center = area.y + area.height / 2;
    let centered = Rect::new(area.x, vertical_center, area.width, 1);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered,
    );
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let count = app.list.sessions.len();
    let lines = vec![
        Line::from(Span::styled(
            "My Sessions",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            session_count_label(count),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_filter_bar(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (index, filter) in SessionFilter::ALL.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!("[{}] {}", index + 1, filter.label());
        let style = if *filter == app.list.filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_session_list(app: &AppState, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .list
        .sessions
        .iter()
        .map(|session| build_session_card(session, app.viewer.role, width))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 50)))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default()
        .with_offset(app.list.scroll_offset)
        .with_selected(Some(app.list.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn build_session_card(session: &Session, viewer: UserRole, width: usize) -> ListItem<'static> {
    let mut title_spans = vec![Span::styled(
        truncate_with_ellipsis(&session.title, width.saturating_sub(20)),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    title_spans.push(Span::raw("  "));
    title_spans.push(Span::styled(
        session.status.to_string(),
        Style::default().fg(status_color(&session.status)),
    ));
    if session.is_joinable() {
        title_spans.push(Span::styled(
            "  ● Ready to join",
            Style::default().fg(Color::Green),
        ));
    }

    let mut detail = format_schedule(session.scheduled_at);
    if let Some(minutes) = session.duration {
        detail.push_str(&format!("  ·  {minutes} min"));
    }
    let counterparty = counterparty_label(session, viewer);
    if !counterparty.is_empty() {
        detail.push_str(&format!("  ·  with {counterparty}"));
    }

    let mut lines = vec![
        Line::from(title_spans),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
    ];
    if let Some(description) = &session.description {
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(description, width),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::default());

    ListItem::new(lines)
}

fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    let show_tips = app.viewer.role == UserRole::Mentee;
    let stats_height = 4u16;

    let constraints = if show_tips {
        vec![
            Constraint::Length(stats_height),
            Constraint::Length(MENTEE_TIPS.len() as u16 + 2),
            Constraint::Min(0),
        ]
    } else {
        vec![Constraint::Length(stats_height), Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let stats = vec![
        Line::from(vec![
            Span::raw("Upcoming   "),
            Span::styled(
                upcoming_count(&app.list.sessions).to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Completed  "),
            Span::styled(
                completed_count(&app.list.sessions).to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(stats).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quick Stats")
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    if show_tips {
        let tips: Vec<Line> = MENTEE_TIPS
            .iter()
            .map(|tip| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::Cyan)),
                    Span::raw(*tip),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(tips).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Session Tips")
                    .padding(Padding::horizontal(1)),
            ),
            chunks[1],
        );
    }
}

fn render_empty_state(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "No sessions found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            empty_state_message(app.viewer.role),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if shows_discovery_hint(app.viewer.role) {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("s", Style::default().fg(Color::Cyan)),
            Span::raw(" find a mentor"),
        ]));
    }

    let height = lines.len() as u16;
    let top = area.y + (area.height.saturating_sub(height + HINT_HEIGHT)) / 2;
    let centered = Rect::new(area.x, top, area.width, height);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );

    let hint_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
    render_hints(frame, hint_area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " 1-4 filter · tab cycle · r refresh · ↑↓ select · enter open · q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}

// ============================================================================
// Display helpers
// ============================================================================

/// Badge color for a session status.
///
/// Unknown statuses fall back to dark gray; never the error color.
pub fn status_color(status: &SessionStatus) -> Color {
    match status {
        SessionStatus::Completed => Color::Green,
        SessionStatus::InProgress => Color::Blue,
        SessionStatus::Cancelled => Color::Red,
        SessionStatus::Scheduled => Color::Yellow,
        SessionStatus::Other(_) => Color::DarkGray,
    }
}

/// Name shown opposite the viewer, or empty when the record lacks one.
pub fn counterparty_label(session: &Session, viewer: UserRole) -> String {
    session.counterparty(viewer).unwrap_or_default().to_string()
}

/// Count of held sessions with status Scheduled, independent of the filter.
pub fn upcoming_count(sessions: &[Session]) -> usize {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Scheduled)
        .count()
}

/// Count of held sessions with status Completed, independent of the filter.
pub fn completed_count(sessions: &[Session]) -> usize {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .count()
}

/// Role-dependent empty-state message.
pub fn empty_state_message(role: UserRole) -> &'static str {
    match role {
        UserRole::Mentee => "You haven't booked any sessions yet.",
        _ => "You don't have any sessions scheduled.",
    }
}

/// Whether the empty state shows the discovery call-to-action.
pub fn shows_discovery_hint(role: UserRole) -> bool {
    role == UserRole::Mentee
}

fn session_count_label(count: usize) -> String {
    if count == 1 {
        "1 total session".to_string()
    } else {
        format!("{count} total sessions")
    }
}
