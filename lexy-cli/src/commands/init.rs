//! Init command - create the configuration file and course library.

use lexy::config::{config_file_path, ConfigFile};
use lexy::library::CourseLibrary;

use crate::error::CliError;

/// Run the init command.
///
/// Existing settings are kept; missing ones are written with their defaults.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    let existed = path.exists();

    let config = ConfigFile::load()?;
    config.save()?;
    let library = CourseLibrary::open(&config.library.directory)?;

    if existed {
        println!("Updated configuration file: {}", path.display());
    } else {
        println!("Created configuration file: {}", path.display());
    }
    println!("Course library: {}", library.dir().display());
    println!();
    println!("Edit this file to customize Lexy settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
