//! MentorHub platform API: wire model and HTTP client.

mod client;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use types::{
    AuthUser, Participant, Session, SessionFilter, SessionStatus, UserRole, format_schedule,
    format_schedule_in,
};
