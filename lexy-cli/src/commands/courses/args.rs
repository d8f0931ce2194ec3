//! CLI argument types for course commands.

use std::path::PathBuf;

use clap::Subcommand;
use lexy::importer::ImportConfig;

/// Course library subcommands.
#[derive(Debug, Subcommand)]
pub enum CourseCommands {
    /// Import a .lexy course package into the library
    Import {
        /// Package file (.lexy or .zip)
        package: PathBuf,

        /// Course library directory (overrides library.directory)
        #[arg(long)]
        library_dir: Option<PathBuf>,

        /// Replace an existing course of the same language without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// List imported courses
    List {
        /// Course library directory (overrides library.directory)
        #[arg(long)]
        library_dir: Option<PathBuf>,

        /// Show record counts and import time
        #[arg(short, long)]
        long: bool,
    },

    /// Show details of an imported course
    Info {
        /// Course id
        id: String,

        /// Course library directory (overrides library.directory)
        #[arg(long)]
        library_dir: Option<PathBuf>,
    },

    /// Remove an imported course
    Remove {
        /// Course id
        id: String,

        /// Course library directory (overrides library.directory)
        #[arg(long)]
        library_dir: Option<PathBuf>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the import command.
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub package: PathBuf,
    pub library_dir: PathBuf,
    pub auto_confirm: bool,
    pub config: ImportConfig,
}

/// Arguments for the list command.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub library_dir: PathBuf,
    pub long: bool,
}

/// Arguments for the info command.
#[derive(Debug, Clone)]
pub struct InfoArgs {
    pub id: String,
    pub library_dir: PathBuf,
}

/// Arguments for the remove command.
#[derive(Debug, Clone)]
pub struct RemoveArgs {
    pub id: String,
    pub library_dir: PathBuf,
    pub force: bool,
}
