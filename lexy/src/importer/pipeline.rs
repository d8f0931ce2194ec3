//! Import pipeline orchestration.
//!
//! Runs the stages strictly in order, once per package:
//!
//! ```text
//! Reading → ManifestValidated → ConflictChecked → SegmentsLoaded
//!         → AssetsResolved → Assembled → (Delivered)
//! ```
//!
//! Any stage error ends the run with [`ImportError`]; declining the conflict
//! prompt ends it with [`ImportOutcome::Cancelled`]. Nothing reaches a
//! [`CourseSink`] unless every stage succeeded.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::archive::{PackageArchive, PackageSource};
use crate::package::{CourseRecord, MediaMap, SegmentKind};

use super::assembler::{assemble_course, AssemblyParts};
use super::assets::{resolve_assets, ResolveReport};
use super::config::ImportConfig;
use super::conflict::{resolve_conflict, ConflictDecision, ConflictPrompt, LanguageConflict};
use super::error::{ImportError, ImportResult};
use super::manifest::read_manifest;
use super::segments::{load_segments, SegmentStats};

/// Progress callback for import operations.
///
/// Called once per completed stage with a human-readable message.
pub type ImportProgressCallback = Box<dyn Fn(ImportStage, &str) + Send + Sync>;

/// Import stages for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Package bytes opened as a container.
    Reading,
    /// Manifest found and validated.
    ManifestValidated,
    /// Language conflict gate passed.
    ConflictChecked,
    /// Declared data segments loaded.
    SegmentsLoaded,
    /// Culture asset references inlined.
    AssetsResolved,
    /// Course record built.
    Assembled,
    /// Course handed to the consuming application.
    Delivered,
}

impl ImportStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reading => "Reading package",
            Self::ManifestValidated => "Validating manifest",
            Self::ConflictChecked => "Checking conflicts",
            Self::SegmentsLoaded => "Loading data",
            Self::AssetsResolved => "Resolving assets",
            Self::Assembled => "Assembling course",
            Self::Delivered => "Delivered",
        }
    }
}

/// Receiver of imported courses.
pub trait CourseSink {
    /// Value returned on successful delivery.
    type Receipt;
    /// Error raised when the sink rejects the course.
    type Error;

    /// Take ownership of an imported course.
    fn deliver(
        &mut self,
        course: CourseRecord,
        media_map: MediaMap,
    ) -> Result<Self::Receipt, Self::Error>;
}

/// Statistics gathered during one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// SHA-256 of the package bytes, when imported from bytes or a file.
    pub package_sha256: Option<String>,
    /// Size of the package in bytes, when known.
    pub package_bytes: Option<usize>,
    /// Number of file entries in the package.
    pub entries: usize,
    /// Segment loading summary.
    pub segments: SegmentStats,
    /// Asset resolution summary.
    pub assets: ResolveReport,
}

/// A course that passed every stage and is ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCourse {
    pub course: CourseRecord,
    /// Always empty; see [`MediaMap`].
    pub media_map: MediaMap,
    /// Conflict the user agreed to resolve by replacement, if any.
    pub replaces: Option<LanguageConflict>,
    pub stats: ImportStats,
}

/// Terminal result of an import that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Every stage succeeded.
    Imported(ImportedCourse),
    /// The user declined to replace an existing course.
    Cancelled(LanguageConflict),
}

impl ImportOutcome {
    /// The imported course, if the import was not cancelled.
    pub fn imported(self) -> Option<ImportedCourse> {
        match self {
            Self::Imported(imported) => Some(imported),
            Self::Cancelled(_) => None,
        }
    }

    /// Whether the user cancelled the import.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Slot held for the duration of one import.
///
/// Released on drop, whatever the outcome.
pub(crate) struct ImportGuard<'a> {
    busy: &'a AtomicBool,
}

impl<'a> ImportGuard<'a> {
    fn acquire(busy: &'a AtomicBool) -> ImportResult<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::ImportInProgress)?;
        Ok(Self { busy })
    }
}

impl Drop for ImportGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// The course-package import pipeline.
///
/// One pipeline runs at most one import at a time; a second call made while
/// an import is in flight (for instance from inside a conflict prompt) fails
/// with [`ImportError::ImportInProgress`].
pub struct ImportPipeline {
    config: ImportConfig,
    on_progress: Option<ImportProgressCallback>,
    busy: AtomicBool,
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl ImportPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            on_progress: None,
            busy: AtomicBool::new(false),
        }
    }

    /// Report stage completions to `callback`.
    pub fn with_progress(mut self, callback: ImportProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Whether an import is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn try_acquire(&self) -> ImportResult<ImportGuard<'_>> {
        ImportGuard::acquire(&self.busy)
    }

    fn report(&self, stage: ImportStage, message: &str) {
        if let Some(ref cb) = self.on_progress {
            cb(stage, message);
        }
    }

    /// Import a package file from disk.
    ///
    /// The file extension is not checked.
    pub fn import_file(
        &self,
        path: &Path,
        existing_languages: &[String],
        prompt: &dyn ConflictPrompt,
    ) -> ImportResult<ImportOutcome> {
        let _guard = self.try_acquire()?;

        let bytes = fs::read(path).map_err(|e| ImportError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "Importing package");

        self.run_bytes(bytes, existing_languages, prompt)
    }

    /// Import a package from its raw bytes.
    pub fn import_bytes(
        &self,
        bytes: Vec<u8>,
        existing_languages: &[String],
        prompt: &dyn ConflictPrompt,
    ) -> ImportResult<ImportOutcome> {
        let _guard = self.try_acquire()?;
        self.run_bytes(bytes, existing_languages, prompt)
    }

    /// Import from an already opened package source.
    pub fn import_source<S: PackageSource + ?Sized>(
        &self,
        source: &mut S,
        existing_languages: &[String],
        prompt: &dyn ConflictPrompt,
    ) -> ImportResult<ImportOutcome> {
        let _guard = self.try_acquire()?;
        self.report(ImportStage::Reading, "Package source ready");
        self.run(source, existing_languages, prompt, ImportStats::default())
    }

    /// Hand an imported course to `sink`.
    pub fn deliver<S: CourseSink>(
        &self,
        imported: ImportedCourse,
        sink: &mut S,
    ) -> Result<S::Receipt, S::Error> {
        let course_id = imported.course.id.clone();
        let receipt = sink.deliver(imported.course, imported.media_map)?;

        info!(course_id = %course_id, "Course delivered");
        self.report(ImportStage::Delivered, &format!("Delivered {}", course_id));
        Ok(receipt)
    }

    fn run_bytes(
        &self,
        bytes: Vec<u8>,
        existing_languages: &[String],
        prompt: &dyn ConflictPrompt,
    ) -> ImportResult<ImportOutcome> {
        let mut archive = PackageArchive::from_bytes(bytes)?;
        let stats = ImportStats {
            package_sha256: Some(archive.sha256().to_string()),
            package_bytes: Some(archive.byte_len()),
            ..ImportStats::default()
        };
        self.report(
            ImportStage::Reading,
            &format!("Opened package with {} entries", archive.len()),
        );

        self.run(&mut archive, existing_languages, prompt, stats)
    }

    fn run<S: PackageSource + ?Sized>(
        &self,
        source: &mut S,
        existing_languages: &[String],
        prompt: &dyn ConflictPrompt,
        mut stats: ImportStats,
    ) -> ImportResult<ImportOutcome> {
        stats.entries = source.entry_names().len();

        // Stage: manifest
        let manifest = read_manifest(source, &self.config)?;
        info!(
            language = manifest.language(),
            course_id = manifest.course_id.as_deref().unwrap_or("(generated)"),
            data_files = manifest.data_files.len(),
            "Manifest validated"
        );
        self.report(
            ImportStage::ManifestValidated,
            &format!("Manifest for {}", manifest.language()),
        );

        // Stage: conflict gate, before any segment is touched
        let replaces = match resolve_conflict(manifest.language(), existing_languages, prompt) {
            ConflictDecision::Proceed => None,
            ConflictDecision::Replace(conflict) => {
                info!(%conflict, "Replacing existing course");
                Some(conflict)
            }
            ConflictDecision::Abort(conflict) => {
                info!(%conflict, "Import cancelled by user");
                return Ok(ImportOutcome::Cancelled(conflict));
            }
        };
        match &replaces {
            Some(conflict) => self.report(
                ImportStage::ConflictChecked,
                &format!("Replacing existing {} course", conflict.existing),
            ),
            None => self.report(ImportStage::ConflictChecked, "No blocking conflicts"),
        }

        // Stage: segments
        let segments = load_segments(source, &manifest)?;
        debug!(
            dictionary = segments.len_of(SegmentKind::Dictionary),
            grammar = segments.len_of(SegmentKind::Grammar),
            culture = segments.len_of(SegmentKind::Culture),
            units = segments.len_of(SegmentKind::Units),
            "Segments loaded"
        );
        self.report(
            ImportStage::SegmentsLoaded,
            &format!(
                "Loaded {} of {} declared data files",
                segments.stats.loaded, segments.stats.declared
            ),
        );

        // Stage: assets
        let resolved = resolve_assets(source, segments.culture, &self.config.asset_prefix)?;
        if !resolved.report.missing.is_empty() {
            warn!(
                missing = resolved.report.missing.len(),
                "Some asset references could not be resolved"
            );
        }
        self.report(
            ImportStage::AssetsResolved,
            &format!("Inlined {} assets", resolved.report.resolved),
        );

        // Stage: assembly
        let parts = AssemblyParts {
            dictionary: segments.dictionary,
            grammar: segments.grammar,
            units: segments.units,
            culture_items: resolved.items,
        };
        let (course, media_map) = assemble_course(manifest, parts, &self.config);
        info!(course_id = %course.id, title = %course.course_title, "Course assembled");
        self.report(ImportStage::Assembled, &course.course_title);

        stats.segments = segments.stats;
        stats.assets = resolved.report;

        Ok(ImportOutcome::Imported(ImportedCourse {
            course,
            media_map,
            replaces,
            stats,
        }))
    }
}
