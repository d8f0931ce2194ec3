//! Course CLI commands for importing and managing courses.
//!
//! This module implements the Command Pattern with trait-based dependency
//! injection:
//!
//! - `traits`: Core interfaces (`Output`, `Interaction`, `CommandHandler`)
//! - `services`: Terminal implementations of the traits
//! - `args`: CLI argument types and parsing (clap-derived)
//! - `handlers`: Command handlers implementing the commands
//!
//! Handlers depend only on trait interfaces via `CommandContext`, so they can
//! be tested with mock output and scripted answers.

mod args;
mod handlers;
mod services;
#[cfg(test)]
pub(crate) mod testing;
mod traits;

pub use args::CourseCommands;
pub use handlers::{ImportHandler, InfoHandler, ListHandler, RemoveHandler};
pub use services::{ConsoleInteraction, ConsoleOutput};
pub use traits::{CommandHandler, Output};

use std::path::PathBuf;

use args::{ImportArgs, InfoArgs, ListArgs, RemoveArgs};
use lexy::config::ConfigFile;
use traits::CommandContext;

use crate::error::CliError;

/// Library directory from the command line, falling back to the config file.
fn library_dir(cli_dir: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    cli_dir.unwrap_or_else(|| config.library.directory.clone())
}

/// Run a course subcommand.
///
/// Creates the terminal context and dispatches to the matching handler.
pub fn run(command: CourseCommands, config: &ConfigFile) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction::new();
    let ctx = CommandContext::new(&output, &interaction);

    match command {
        CourseCommands::Import {
            package,
            library_dir: dir,
            yes,
        } => ImportHandler::execute(
            ImportArgs {
                package,
                library_dir: library_dir(dir, config),
                auto_confirm: yes || config.import.auto_confirm,
                config: config.import_config(),
            },
            &ctx,
        ),

        CourseCommands::List {
            library_dir: dir,
            long,
        } => ListHandler::execute(
            ListArgs {
                library_dir: library_dir(dir, config),
                long,
            },
            &ctx,
        ),

        CourseCommands::Info {
            id,
            library_dir: dir,
        } => InfoHandler::execute(
            InfoArgs {
                id,
                library_dir: library_dir(dir, config),
            },
            &ctx,
        ),

        CourseCommands::Remove {
            id,
            library_dir: dir,
            force,
        } => RemoveHandler::execute(
            RemoveArgs {
                id,
                library_dir: library_dir(dir, config),
                force,
            },
            &ctx,
        ),
    }
}
