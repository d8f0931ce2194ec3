//! Lexy - Course package import for the Lexy language-learning app
//!
//! This library turns `.lexy` course packages (zip archives with a JSON
//! manifest, JSON data files and bundled media) into self-contained course
//! records, and keeps a local library of imported courses.
//!
//! # Modules
//!
//! - [`archive`] - Read access to package containers
//! - [`package`] - Package and course data model
//! - [`importer`] - The staged import pipeline
//! - [`library`] - On-disk store of imported courses
//! - [`config`] - `config.ini` handling
//! - [`logging`] - Subscriber setup

pub mod archive;
pub mod config;
pub mod importer;
pub mod library;
pub mod logging;
pub mod package;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Build a zip archive holding `entries`.
    ///
    /// Names ending in `/` become directory entries.
    pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for (name, bytes) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
        }

        writer.finish().unwrap().into_inner()
    }
}
