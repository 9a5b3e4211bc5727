//! Fingerboard - split multi-zone drag keyboard
//!
//! Command-line front end for inspecting and calibrating the zone layout and
//! replaying touch scripts through the keyboard controller.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fingerboard::cli::{ConfigArgs, ExitCode, LayoutArgs, SimulateArgs};
use fingerboard::config::Config;

/// Fingerboard - split multi-zone drag keyboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect, reset, import or export the zone layout
    Layout(LayoutArgs),
    /// Replay a touch script through the keyboard
    Simulate(SimulateArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing: --verbose wins, then RUST_LOG, then the configured level
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            Config::load()
                .map(|config| config.log.level)
                .unwrap_or_else(|_| "info".to_string())
                .into()
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Layout(args) => args.execute(),
        Command::Simulate(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
    }
}
