//! Full-screen session list TUI for mhub.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use mhub_core::api::AuthUser;
use mhub_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive session list.
///
/// The viewer is fetched by the caller and injected here so the view itself
/// never reaches for ambient auth state.
pub fn run(config: Config, viewer: AuthUser) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The session view requires a terminal.\n\
             Use `mhub sessions list` for non-interactive output."
        );
    }

    let mut runtime = TuiRuntime::new(config, viewer)?;
    runtime.run()
}
