use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use common::config::StoreBackend;
use common::storage::open_store;
use common::{ChallengeService, TrackerMode};
use console::Term;
use tracing::Level;

mod commands;
mod config;
mod ui;

use commands::Context;
use commands::challenges::Filter;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "cloud-roulette",
    about = "Spin a cloud provider, spin a deployment, go build it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: config/config.toml)
    #[arg(long, global = true, env = "ROULETTE_CONFIG")]
    config: Option<PathBuf>,
    /// Use this local JSON document instead of the configured store
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Skip spin animations
    #[arg(long, global = true)]
    no_animate: bool,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cloud providers
    Providers,
    /// List deployment tasks
    Deployments,
    /// List recorded challenges, oldest first
    Challenges {
        /// Only challenges not yet done
        #[arg(long, conflicts_with = "done")]
        open: bool,
        /// Only completed challenges
        #[arg(long)]
        done: bool,
    },
    /// Spin the provider wheel
    Spin,
    /// Spin a deployment and record the challenge
    Pick {
        /// Provider id; spins the provider wheel first when omitted
        #[arg(short, long)]
        provider: Option<String>,
        /// Leave out deployments already done on the provider
        #[arg(long)]
        exclude_completed: bool,
    },
    /// Play interactively: provider, deployment, tracker, repeat
    Play,
    /// Show the completion matrix
    Tracker {
        /// Row layout: deployment or challenge
        #[arg(long)]
        mode: Option<TrackerMode>,
    },
    /// Flip a challenge between open and done
    Toggle { id: String },
    /// Mark a challenge as done
    Done {
        id: String,
        /// Mark it open again instead
        #[arg(long)]
        undo: bool,
    },
    /// Write all game data as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all game data with a previously exported file
    Import {
        file: PathBuf,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cli.store {
        config.store.backend = StoreBackend::Local;
        config.store.path = path;
    }

    let store = open_store(&config.store)
        .await
        .context("Failed to open challenge store")?;

    let ctx = Context {
        service: ChallengeService::new(store),
        config,
        json: cli.json,
        animate: !cli.no_animate,
        term: Term::stdout(),
    };

    match cli.command {
        Commands::Providers => commands::catalog::providers(&ctx).await,
        Commands::Deployments => commands::catalog::deployments(&ctx).await,
        Commands::Challenges { open, done } => {
            let filter = match (open, done) {
                (true, _) => Filter::Open,
                (_, true) => Filter::Done,
                _ => Filter::All,
            };
            commands::challenges::list(&ctx, filter).await
        }
        Commands::Spin => commands::spin::spin(&ctx).await,
        Commands::Pick {
            provider,
            exclude_completed,
        } => commands::spin::pick(&ctx, provider.as_deref(), exclude_completed).await,
        Commands::Play => commands::play::run(&ctx).await,
        Commands::Tracker { mode } => commands::tracker::show(&ctx, mode).await,
        Commands::Toggle { id } => commands::challenges::toggle(&ctx, &id).await,
        Commands::Done { id, undo } => commands::challenges::set_done(&ctx, &id, !undo).await,
        Commands::Export { output } => commands::data::export(&ctx, output.as_deref()).await,
        Commands::Import { file, yes } => commands::data::import(&ctx, &file, yes).await,
    }
}
