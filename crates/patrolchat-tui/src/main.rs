//! patrolchat terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Demo roster, random replies
//! patrolchat-tui --actor-id 1 --actor-name "Anna Berger"
//!
//! # Roster and incident from files, reproducible replies, debug log
//! patrolchat-tui --roster roster.json --incident incident.json --seed 7 \
//!     --log-file patrolchat.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use patrolchat_app::{
    Actor, App, AppConfig, AppEvent, ChannelId, Runtime, Simulator, SimulatorConfig,
    StatusRoster, incident::Incident,
};
use patrolchat_tui::{SystemEnv, TerminalDriver, Theme, ThemeFile, TuiError, demo, files};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// patrolchat terminal client
#[derive(Parser, Debug)]
#[command(name = "patrolchat-tui")]
#[command(about = "Station chat with channels, user directory and direct messages")]
#[command(version)]
struct Args {
    /// Id of the signed-in user
    #[arg(long)]
    actor_id: Option<String>,

    /// Display name of the signed-in user
    #[arg(long)]
    actor_name: Option<String>,

    /// Channel to open on start
    #[arg(long)]
    channel: Option<String>,

    /// Status roster (JSON object of status label to user records)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Palette overrides (JSON object of camelCase keys to #RRGGBB)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Incident to show in the location panel (JSON)
    #[arg(long)]
    incident: Option<PathBuf>,

    /// Delay before a synthetic reply, in milliseconds
    #[arg(long, default_value = "2000")]
    reply_delay_ms: u64,

    /// A reply is sent when a uniform draw exceeds this value
    #[arg(long, default_value = "0.7")]
    reply_threshold: f64,

    /// Seed for reproducible replies
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (nothing is logged without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The terminal is taken over by the UI, so logs only go to a file.
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .map_err(|source| TuiError::File { path: path.clone(), source })?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!("patrolchat starting");

    let roster: StatusRoster = match &args.roster {
        Some(path) => files::load_json(path)?,
        None => demo::demo_roster(),
    };
    let theme = match &args.theme {
        Some(path) => Theme::from_file(&files::load_json::<ThemeFile>(path)?)?,
        None => Theme::default(),
    };
    let incident: Option<Incident> =
        args.incident.as_deref().map(files::load_json::<Incident>).transpose()?;

    let actor = match (args.actor_id, args.actor_name) {
        (Some(id), name) => {
            let name = name.unwrap_or_else(|| id.clone());
            Some(Actor::new(id, name))
        },
        (None, Some(name)) => {
            tracing::warn!(%name, "--actor-name without --actor-id ignored");
            None
        },
        (None, None) => None,
    };

    let env = match args.seed {
        Some(seed) => SystemEnv::seeded(seed),
        None => SystemEnv::new(),
    };
    let simulator = Simulator::new(env, SimulatorConfig {
        reply_threshold: args.reply_threshold,
        reply_delay: Duration::from_millis(args.reply_delay_ms),
        ..Default::default()
    });
    let app = App::new(actor, AppConfig {
        initial_channel: args.channel.map(ChannelId::new),
        ..Default::default()
    });

    let driver = TerminalDriver::new(theme, incident)?;
    let initial_size = driver.initial_size()?;

    let mut runtime = Runtime::new(driver, app, simulator);
    runtime.inject(initial_size)?;
    runtime.inject(AppEvent::RosterUpdated(roster))?;

    runtime.run().await?;

    tracing::info!("patrolchat stopped");
    Ok(())
}
