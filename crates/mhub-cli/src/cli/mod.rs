//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use mhub_core::api::SessionFilter;
use mhub_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "mhub")]
#[command(version = "0.1")]
#[command(about = "Terminal client for the MentorHub mentorship platform")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Work with your mentorship sessions
    Sessions {
        #[command(subcommand)]
        command: Option<SessionCommands>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Lists sessions as a table
    List {
        /// Filter to apply (all, upcoming, scheduled, completed)
        #[arg(short, long, default_value = "all")]
        filter: SessionFilter,
    },
    /// Open a session in the browser
    Open {
        /// The ID of the session to open
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive session view
    let Some(command) = cli.command else {
        return run_tui(config).await;
    };

    match command {
        Commands::Sessions { command } => match command {
            None => run_tui(config).await,
            Some(SessionCommands::List { filter }) => {
                logging::init_cli();
                commands::sessions::list(&config, filter).await
            }
            Some(SessionCommands::Open { id }) => {
                logging::init_cli();
                commands::sessions::open(&config, &id)
            }
        },

        Commands::Config { command } => {
            logging::init_cli();
            match command {
                ConfigCommands::Path => commands::config::path(),
                ConfigCommands::Init => commands::config::init(),
                ConfigCommands::Generate => commands::config::generate(),
            }
        }
    }
}

/// Launches the full-screen session view.
///
/// The viewer is resolved before the terminal is taken over so auth failures
/// print as plain errors instead of flashing through the alternate screen.
async fn run_tui(config: config::Config) -> Result<()> {
    // The TUI owns the terminal; logs go to a file instead of stderr.
    let _log_guard = logging::init_tui().context("init logging")?;

    let client = mhub_core::api::ApiClient::new(&config).context("build API client")?;
    let viewer = client.fetch_me().await.context("fetch signed-in user")?;

    mhub_tui::run(config, viewer)
}
