//! Course package importer.
//!
//! Turns a `.lexy` package into a [`CourseRecord`](crate::package::CourseRecord)
//! with every bundled binary inlined, ready to be handed to a
//! [`CourseSink`] such as the [`CourseLibrary`](crate::library::CourseLibrary).
//!
//! # Overview
//!
//! The import workflow:
//! 1. Open the package bytes as a container (`archive`)
//! 2. Read and validate `manifest.json` (`manifest`)
//! 3. Ask before replacing a course of the same language (`conflict`)
//! 4. Load the declared data files (`segments`)
//! 5. Inline culture item assets as `data:` URLs (`assets`)
//! 6. Build the course record (`assembler`)
//! 7. Deliver it to the application (`pipeline`)
//!
//! Stages 1-6 either all succeed or the import fails with an
//! [`ImportError`], so a sink never sees a half-built course.
//!
//! # Example
//!
//! ```ignore
//! use lexy::importer::{AutoConfirm, ImportConfig, ImportOutcome, ImportPipeline};
//! use lexy::library::CourseLibrary;
//!
//! let mut library = CourseLibrary::open("/path/to/library")?;
//! let pipeline = ImportPipeline::new(ImportConfig::default());
//!
//! let existing = library.languages()?;
//! match pipeline.import_file("spanish.lexy".as_ref(), &existing, &AutoConfirm)? {
//!     ImportOutcome::Imported(imported) => {
//!         let report = pipeline.deliver(imported, &mut library)?;
//!         println!("Saved to {}", report.path.display());
//!     }
//!     ImportOutcome::Cancelled(_) => println!("Import cancelled."),
//! }
//! ```

mod assembler;
mod assets;
mod config;
mod conflict;
mod error;
mod inline;
mod manifest;
mod pipeline;
mod segments;

pub use assembler::{assemble_course, generate_course_id, AssemblyParts};
pub use assets::{
    resolve_assets, AssetField, AssetResolver, MissingAsset, ResolveReport, ResolvedCulture,
};
pub use config::{ImportConfig, DEFAULT_ASSET_PREFIX, DEFAULT_COURSE_TITLE};
pub use conflict::{
    find_conflict, resolve_conflict, AutoConfirm, AutoDecline, ConflictDecision, ConflictPrompt,
    LanguageConflict,
};
pub use error::{ImportError, ImportErrorKind, ImportResult, GENERIC_FAILURE_MESSAGE};
pub use inline::{content_type_for, decode_data_url, encode_data_url};
pub use manifest::{parse_manifest, read_manifest};
pub use pipeline::{
    CourseSink, ImportOutcome, ImportPipeline, ImportProgressCallback, ImportStage, ImportStats,
    ImportedCourse,
};
pub use segments::{load_segments, LoadedSegments, SegmentStats};
