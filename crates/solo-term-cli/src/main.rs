//! solo-term CLI — user-facing launcher for the solo-term terminal.
//!
//! Every invocation claims a role for the current user identity: the first
//! process becomes the leader and services hand-off requests; later ones
//! hand their request over and exit immediately.

use clap::{Parser, Subcommand};
use solo_term_broker::{
    claim_role, load_config, notify_leader, resolve_identity, LeaderLoop,
};
use solo_term_types::{ChannelNames, Role};
use solo_term_window::{SessionFactory, WindowActivator, WindowError};
use tokio::sync::watch;
use tracing::info;

/// Exit code for fatal identity or channel setup failures.
const EXIT_SETUP_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "solo-term",
    about = "Single-instance terminal session launcher",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a session: become the leader, or hand this request to it.
    Start {
        /// Path to configuration file.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print the coordination names derived for the current identity.
    Names {
        /// Path to configuration file.
        #[arg(short, long)]
        config: Option<String>,
    },
}

/// Session factory stub until the terminal frontend lands.
struct PrintSessions;

impl SessionFactory for PrintSessions {
    fn create_session(&mut self) -> Result<(), WindowError> {
        println!("solo-term: new session requested");
        Ok(())
    }
}

/// Window lookup stub; the native backends (X11/Win32) land in later
/// phases, so followers currently always fall back to the signal channel.
struct NoWindows;

impl WindowActivator for NoWindows {
    fn activate_existing(&self, _key: &str) -> Result<bool, WindowError> {
        Ok(false)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { config } => {
            if let Err(e) = start(config.as_deref()).await {
                tracing::error!(error = %e, "fatal: cannot set up instance coordination");
                std::process::exit(EXIT_SETUP_FAILURE);
            }
        }
        Commands::Names { config } => {
            let config = load_config(config.as_deref())?;
            let identity = resolve_identity(&config)?;
            let names = ChannelNames::for_identity(&identity);
            println!("identity: {identity}");
            println!("region:   {}", names.region);
            println!("mutex:    {}", names.mutex);
        }
    }

    Ok(())
}

async fn start(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let identity = resolve_identity(&config)?;
    let channel = claim_role(&identity, config.broker.region_size)?;

    match channel.role() {
        Role::Follower => {
            // Exit 0 whatever the outcome; a dropped hand-off is an
            // accepted best-effort miss, not a failure.
            let outcome = notify_leader(&channel, &NoWindows, &config.window.lookup_key)?;
            info!(outcome = ?outcome, "handed off to leader, exiting");
            Ok(())
        }
        Role::Leader => {
            let mut leader = LeaderLoop::new(
                channel,
                Box::new(PrintSessions),
                config.broker.poll_interval(),
            );
            leader.create_initial_session()?;

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, shutting down");
                    let _ = shutdown_tx.send(true);
                }
            });

            leader.run(shutdown_rx).await?;
            // The loop has stopped; dropping the leader now releases the
            // region mapping and mutex handle, in that order.
            Ok(())
        }
    }
}
