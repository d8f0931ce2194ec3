//! `lexy config` - inspect and edit `config.ini`.
//!
//! Every subcommand works on an explicit file path and writes through
//! [`Output`], so the same code serves the terminal and the tests.

use std::path::Path;

use clap::Subcommand;
use lexy::config::{config_file_path, ConfigFile, ConfigKey};

use super::courses::{ConsoleOutput, Output};
use crate::error::CliError;

const NOT_SET: &str = "(not set)";

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of one setting
    Get {
        /// Setting name, e.g. import.auto_confirm
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting name, e.g. library.directory
        key: String,

        /// New value
        value: String,
    },

    /// Show every setting with its current value
    List,

    /// Print where the configuration file lives
    Path,
}

/// Run a config subcommand against the user's configuration file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    execute(command, &config_file_path(), &output)
}

fn execute(command: ConfigCommands, path: &Path, out: &dyn Output) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => get(path, &key, out),
        ConfigCommands::Set { key, value } => set(path, &key, &value, out),
        ConfigCommands::List => list(path, out),
        ConfigCommands::Path => {
            out.println(&path.display().to_string());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        let known: Vec<&str> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "Unknown setting '{}'. Known settings: {}",
            key,
            known.join(", ")
        ))
    })
}

fn display_value(value: String) -> String {
    if value.is_empty() {
        NOT_SET.to_string()
    } else {
        value
    }
}

fn get(path: &Path, key: &str, out: &dyn Output) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    out.println(&display_value(key.get(&config)));
    Ok(())
}

fn set(path: &Path, key: &str, value: &str, out: &dyn Output) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut config = ConfigFile::load_from(path)?;

    let previous = key.get(&config);
    key.set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let current = key.get(&config);

    if previous == current {
        out.println(&format!("{} unchanged ({})", key.name(), display_value(current)));
        return Ok(());
    }

    config.save_to(path)?;
    out.println(&format!(
        "{}: {} -> {}",
        key.name(),
        display_value(previous),
        display_value(current)
    ));
    if key == ConfigKey::LibraryDirectory {
        out.indented("Courses already imported stay in the previous directory.");
    }
    Ok(())
}

fn list(path: &Path, out: &dyn Output) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;

    out.header("Lexy settings");
    out.println(&format!("File: {}", path.display()));

    let mut section = "";
    for key in ConfigKey::all() {
        if key.section() != section {
            section = key.section();
            out.subheader(&format!("[{}]", section));
        }
        out.indented(&format!(
            "{} = {}",
            key.key_name(),
            display_value(key.get(&config))
        ));
        out.indented(&format!("  {}", key.description()));
    }
    Ok(())
}
