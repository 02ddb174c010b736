//! CLI frontend for the Howl social-deduction rules engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "howl",
    about = "Howl: a rules engine for werewolf-style party games",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted game from a scenario file
    Play {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// RNG seed for dealing and vote ties (overrides the scenario)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show private results and debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// List every role with its team and ability
    Roles,

    /// Validate a scenario file without playing it
    Check {
        /// Scenario file (JSON)
        scenario: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Play { verbose: true, .. });
    init_tracing(verbose);

    let result = match cli.command {
        Commands::Play {
            scenario,
            seed,
            verbose,
        } => commands::play::run(&scenario, seed, verbose),
        Commands::Roles => commands::roles::run(),
        Commands::Check { scenario } => commands::check::run(&scenario),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
