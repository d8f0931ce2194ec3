//! Local course library.
//!
//! Imported courses are kept as one JSON file per course:
//!
//! ```text
//! <library dir>/
//! ├── es-101.json
//! ├── course-3f2a...json
//! └── fr-1.json
//! ```
//!
//! The library holds at most one course per language (compared ignoring
//! case). Delivering a course replaces any stored course of the same
//! language, which is what the import conflict prompt asks the user about.

mod error;
mod stored;

pub use error::{LibraryError, LibraryResult};
pub use stored::{CourseSummary, StoredCourse};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::importer::CourseSink;
use crate::package::{CourseRecord, MediaMap};

const COURSE_FILE_EXTENSION: &str = "json";

/// Where a delivered course was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// File holding the new course.
    pub path: PathBuf,
    /// Ids of the stored courses it replaced.
    pub replaced: Vec<String>,
}

impl DeliveryReport {
    /// Whether any stored course was replaced.
    pub fn replaced_existing(&self) -> bool {
        !self.replaced.is_empty()
    }
}

/// Directory-backed store of imported courses.
#[derive(Debug, Clone)]
pub struct CourseLibrary {
    dir: PathBuf,
}

impl CourseLibrary {
    /// Open the library at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> LibraryResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| LibraryError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Library directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All stored courses, sorted by language then title.
    ///
    /// Files that cannot be parsed are skipped and logged.
    pub fn courses(&self) -> LibraryResult<Vec<(PathBuf, StoredCourse)>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| LibraryError::io(&self.dir, e))?;

        let mut courses = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| LibraryError::io(&self.dir, e))?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(COURSE_FILE_EXTENSION)
            {
                continue;
            }

            match read_course(&path) {
                Ok(stored) => courses.push((path, stored)),
                Err(e) => warn!(error = %e, "Skipping unreadable course file"),
            }
        }

        courses.sort_by(|(_, a), (_, b)| {
            a.language
                .to_lowercase()
                .cmp(&b.language.to_lowercase())
                .then_with(|| a.course_title.cmp(&b.course_title))
        });
        Ok(courses)
    }

    /// Summaries of all stored courses.
    pub fn list(&self) -> LibraryResult<Vec<CourseSummary>> {
        Ok(self
            .courses()?
            .iter()
            .map(|(_, stored)| stored.summary())
            .collect())
    }

    /// Languages of all stored courses.
    pub fn languages(&self) -> LibraryResult<Vec<String>> {
        Ok(self
            .courses()?
            .into_iter()
            .map(|(_, stored)| stored.course.language)
            .collect())
    }

    /// Fetch a course by id.
    pub fn get(&self, id: &str) -> LibraryResult<StoredCourse> {
        self.find(id).map(|(_, stored)| stored)
    }

    /// Delete a course by id.
    pub fn remove(&self, id: &str) -> LibraryResult<CourseSummary> {
        let (path, stored) = self.find(id)?;
        fs::remove_file(&path).map_err(|e| LibraryError::io(&path, e))?;

        info!(course_id = id, path = %path.display(), "Removed course");
        Ok(stored.summary())
    }

    /// Store `stored`, replacing any course with the same language or id.
    pub fn store(&self, stored: StoredCourse) -> LibraryResult<DeliveryReport> {
        let target = self.course_path(&stored.id);

        let mut replaced = Vec::new();
        for (path, existing) in self.courses()? {
            if existing.id != stored.id && !existing.is_language(&stored.language) {
                continue;
            }
            if path != target {
                fs::remove_file(&path).map_err(|e| LibraryError::io(&path, e))?;
            }
            debug!(course_id = %existing.id, "Replacing stored course");
            replaced.push(existing.course.id);
        }

        write_course(&target, &stored)?;
        info!(
            course_id = %stored.id,
            language = %stored.language,
            replaced = replaced.len(),
            "Stored course"
        );

        Ok(DeliveryReport {
            path: target,
            replaced,
        })
    }

    fn find(&self, id: &str) -> LibraryResult<(PathBuf, StoredCourse)> {
        let path = self.course_path(id);
        if path.is_file() {
            let stored = read_course(&path)?;
            if stored.id == id {
                return Ok((path, stored));
            }
        }

        // Fall back to a scan in case two ids sanitize to the same file name.
        self.courses()?
            .into_iter()
            .find(|(_, stored)| stored.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    fn course_path(&self, id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize_file_stem(id), COURSE_FILE_EXTENSION))
    }
}

impl CourseSink for CourseLibrary {
    type Receipt = DeliveryReport;
    type Error = LibraryError;

    fn deliver(
        &mut self,
        course: CourseRecord,
        _media_map: MediaMap,
    ) -> LibraryResult<DeliveryReport> {
        self.store(StoredCourse::new(course))
    }
}

/// Map a course id onto a safe file stem.
pub fn sanitize_file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "course".to_string()
    } else {
        stem
    }
}

fn read_course(path: &Path) -> LibraryResult<StoredCourse> {
    let text = fs::read_to_string(path).map_err(|e| LibraryError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| LibraryError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Write through a temporary file so readers never see a partial course.
fn write_course(path: &Path, stored: &StoredCourse) -> LibraryResult<()> {
    let json =
        serde_json::to_string_pretty(stored).map_err(|source| LibraryError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;

    let temp = path.with_extension("json.tmp");
    fs::write(&temp, json).map_err(|e| LibraryError::io(&temp, e))?;
    fs::rename(&temp, path).map_err(|e| LibraryError::io(path, e))
}
