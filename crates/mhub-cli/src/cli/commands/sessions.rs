//! Session command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use mhub_core::api::{ApiClient, Session, SessionFilter, UserRole, format_schedule};
use mhub_core::config::Config;

/// Prints the viewer's sessions as a table.
pub async fn list(config: &Config, filter: SessionFilter) -> Result<()> {
    let client = ApiClient::new(config).context("build API client")?;
    let viewer = client.fetch_me().await.context("fetch signed-in user")?;
    let sessions = client
        .fetch_sessions(filter)
        .await
        .with_context(|| format!("fetch {} sessions", filter.label().to_lowercase()))?;

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!("{}", render_table(&sessions, viewer.role));
    Ok(())
}

/// Opens a session's detail page in the browser.
pub fn open(config: &Config, id: &str) -> Result<()> {
    let url = config.web_url(&format!("sessions/{id}"))?;
    open::that(url.as_str()).with_context(|| format!("open {url}"))?;
    println!("Opened {url}");
    Ok(())
}

fn render_table(sessions: &[Session], viewer: UserRole) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Title", "Status", "When", "With", "Duration"]);

    for session in sessions {
        table.add_row([
            session.title.clone(),
            session.status.to_string(),
            format_schedule(session.scheduled_at),
            session.counterparty(viewer).unwrap_or("-").to_string(),
            session
                .duration
                .map_or_else(|| "-".to_string(), |mins| format!("{mins} min")),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mhub_core::api::{Participant, SessionStatus};

    fn session(title: &str, mentor: &str, mentee: &str) -> Session {
        Session {
            id: "sess-1".to_string(),
            title: title.to_string(),
            description: None,
            status: SessionStatus::Scheduled,
            scheduled_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap(),
            duration: Some(45),
            mentor: Some(Participant {
                name: mentor.to_string(),
            }),
            mentee: Some(Participant {
                name: mentee.to_string(),
            }),
        }
    }

    #[test]
    fn test_table_shows_counterparty_for_viewer_role() {
        let sessions = vec![session("Intro call", "Ada", "Grace")];

        let as_mentor = render_table(&sessions, UserRole::Mentor).to_string();
        assert!(as_mentor.contains("Grace"));
        assert!(!as_mentor.contains("Ada"));

        let as_mentee = render_table(&sessions, UserRole::Mentee).to_string();
        assert!(as_mentee.contains("Ada"));
        assert!(!as_mentee.contains("Grace"));
    }

    #[test]
    fn test_table_dashes_for_missing_fields() {
        let mut s = session("Intro call", "Ada", "Grace");
        s.duration = None;
        s.mentee = None;

        let rendered = render_table(&[s], UserRole::Mentor).to_string();
        assert!(rendered.contains("Intro call"));
        assert!(rendered.contains('-'));
    }
}
