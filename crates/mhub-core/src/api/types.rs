//! Wire model for the MentorHub API.
//!
//! Sessions arrive inside an envelope (`data.sessions`); both the envelope
//! and the sessions field may be absent, which decodes to an empty list
//! rather than an error. Status and role values the client does not know
//! about must never fail deserialization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Session
// ============================================================================

/// A scheduled mentorship meeting between a mentor and a mentee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: SessionStatus,

    /// When the session takes place.
    pub scheduled_at: DateTime<Utc>,

    /// Length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,

    #[serde(default)]
    pub mentor: Option<Participant>,

    #[serde(default)]
    pub mentee: Option<Participant>,
}

/// The mentor or mentee side of a session.
#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Session {
    /// Name shown opposite the viewer: a mentor sees the mentee, everyone
    /// else sees the mentor.
    pub fn counterparty(&self, viewer: UserRole) -> Option<&str> {
        let participant = match viewer {
            UserRole::Mentor => self.mentee.as_ref(),
            _ => self.mentor.as_ref(),
        };
        participant.map(|p| p.name.as_str())
    }

    /// True exactly when the session is still scheduled (and thus joinable).
    pub fn is_joinable(&self) -> bool {
        self.status == SessionStatus::Scheduled
    }
}

// ============================================================================
// Session status
// ============================================================================

/// Session lifecycle status.
///
/// The platform currently uses {Scheduled, InProgress, Completed, Cancelled};
/// anything else is carried verbatim in `Other` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Other(value) => value,
        }
    }

    fn from_wire(value: String) -> Self {
        match value.as_str() {
            "Scheduled" => Self::Scheduled,
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SessionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_wire(String::deserialize(deserializer)?))
    }
}

impl Serialize for SessionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Viewer
// ============================================================================

/// Role of the authenticated user.
///
/// Unknown roles map to `Other` and behave as "neither mentor nor mentee"
/// wherever the client branches on role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum UserRole {
    Mentor,
    Mentee,
    Other,
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Mentor" => Self::Mentor,
            "Mentee" => Self::Mentee,
            _ => Self::Other,
        }
    }
}

/// The authenticated user, as reported by `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub name: String,
    pub role: UserRole,
}

// ============================================================================
// Filter
// ============================================================================

/// The session list filter.
///
/// Exactly the four values the view offers; each maps to at most one query
/// parameter on `GET /sessions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    #[default]
    All,
    Upcoming,
    Scheduled,
    Completed,
}

impl SessionFilter {
    pub const ALL: [SessionFilter; 4] =
        [Self::All, Self::Upcoming, Self::Scheduled, Self::Completed];

    /// Label shown on the filter control.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Upcoming => "Upcoming",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
        }
    }

    /// Query parameter sent to `GET /sessions`, if any.
    ///
    /// `Upcoming` sends only `upcoming=true`; no `status` parameter
    /// accompanies it.
    pub fn query_param(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::All => None,
            Self::Upcoming => Some(("upcoming", "true")),
            Self::Scheduled => Some(("status", "Scheduled")),
            Self::Completed => Some(("status", "Completed")),
        }
    }

    /// The filter to the right on the filter bar, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Upcoming,
            Self::Upcoming => Self::Scheduled,
            Self::Scheduled => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// The filter to the left on the filter bar, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Completed,
            Self::Upcoming => Self::All,
            Self::Scheduled => Self::Upcoming,
            Self::Completed => Self::Scheduled,
        }
    }
}

impl fmt::Display for SessionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unknown filter '{other}' (expected all, upcoming, scheduled or completed)"
            )),
        }
    }
}

// ============================================================================
// Response envelopes
// ============================================================================

/// Envelope around `GET /sessions`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionsResponse {
    #[serde(default)]
    data: Option<SessionsData>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionsData {
    #[serde(default)]
    sessions: Option<Vec<Session>>,
}

impl SessionsResponse {
    /// A missing `data` or `data.sessions` decodes to an empty list.
    pub(crate) fn into_sessions(self) -> Vec<Session> {
        self.data.and_then(|data| data.sessions).unwrap_or_default()
    }
}

/// Envelope around `GET /auth/me`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MeResponse {
    #[serde(default)]
    data: Option<MeData>,
}

#[derive(Debug, Default, Deserialize)]
struct MeData {
    #[serde(default)]
    user: Option<AuthUser>,
}

impl MeResponse {
    pub(crate) fn into_user(self) -> Option<AuthUser> {
        self.data.and_then(|data| data.user)
    }
}

// ============================================================================
// Display helpers
// ============================================================================

const SCHEDULE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Formats a schedule time for display in the viewer's local timezone,
/// e.g. "Mar 5, 2026, 02:30 PM".
pub fn format_schedule(at: DateTime<Utc>) -> String {
    format_schedule_in(at, &Local)
}

/// Timezone-explicit variant of [`format_schedule`].
pub fn format_schedule_in<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format(SCHEDULE_FORMAT).to_string()
}
