//! Lexy CLI - Command-line interface
//!
//! Imports `.lexy` course packages into a local course library and manages
//! the imported courses.

mod commands;
mod error;

use std::process;

use clap::{Parser, Subcommand};
use lexy::config::ConfigFile;
use lexy::logging::{init_logging, LogGuard};
use tracing::warn;

use commands::config::ConfigCommands;
use commands::courses::CourseCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "lexy", version, about = "Import and manage Lexy course packages")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Courses(CourseCommands),

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create the configuration file and course library
    Init,
}

fn main() {
    let code = run(Cli::parse());
    process::exit(code);
}

/// Run the CLI, returning the exit code.
///
/// Returns before exiting so the log guard flushes buffered lines.
fn run(cli: Cli) -> i32 {
    // Course commands fall back to defaults when the config file is unreadable.
    let (config, config_error) = match ConfigFile::load() {
        Ok(config) => (config, None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };

    let _guard = match setup_logging(&config, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(e) = config_error {
        warn!(error = %e, "Ignoring unreadable configuration file, using defaults");
    }

    let result = match cli.command {
        Commands::Courses(command) => commands::courses::run(command, &config),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init => commands::init::run(),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn setup_logging(config: &ConfigFile, verbose: bool) -> Result<LogGuard, CliError> {
    let mut logging = config.logging_config();
    if verbose {
        logging = logging.with_level("debug");
    }
    Ok(init_logging(&logging)?)
}
