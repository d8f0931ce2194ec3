//! Language conflict detection and the confirmation gate.
//!
//! An import conflicts with the library when a course for the same language
//! (compared case-insensitively) is already registered. The caller decides
//! through a [`ConflictPrompt`] whether the import replaces that course or is
//! abandoned.

use std::fmt;

/// A package whose language is already covered by a registered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConflict {
    /// Language declared by the incoming package.
    pub language: String,
    /// Matching entry from the caller's list of existing languages.
    pub existing: String,
}

impl LanguageConflict {
    /// Question to put to the user.
    pub fn prompt_message(&self) -> String {
        format!(
            "A course for \"{}\" already exists. Do you want to replace its content with this import?",
            self.language
        )
    }
}

impl fmt::Display for LanguageConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "language \"{}\" conflicts with existing course \"{}\"",
            self.language, self.existing
        )
    }
}

/// Blocking yes/no gate consulted on a language conflict.
///
/// Returning `false` cancels the import without error.
pub trait ConflictPrompt {
    /// Ask whether the incoming package should replace the existing course.
    fn confirm_replace(&self, conflict: &LanguageConflict) -> bool;
}

impl<F> ConflictPrompt for F
where
    F: Fn(&LanguageConflict) -> bool,
{
    fn confirm_replace(&self, conflict: &LanguageConflict) -> bool {
        self(conflict)
    }
}

/// Prompt that always accepts the replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConflictPrompt for AutoConfirm {
    fn confirm_replace(&self, _conflict: &LanguageConflict) -> bool {
        true
    }
}

/// Prompt that always declines the replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecline;

impl ConflictPrompt for AutoDecline {
    fn confirm_replace(&self, _conflict: &LanguageConflict) -> bool {
        false
    }
}

/// Result of running the conflict gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictDecision {
    /// No existing course uses this language.
    Proceed,
    /// The user agreed to replace the existing course.
    Replace(LanguageConflict),
    /// The user declined; the import must stop here.
    Abort(LanguageConflict),
}

/// Find the first existing language equal to `language`, ignoring case.
///
/// # Example
///
/// ```
/// use lexy::importer::find_conflict;
///
/// let existing = vec!["Spanish".to_string(), "French".to_string()];
/// let conflict = find_conflict("FRENCH", &existing).unwrap();
///
/// assert_eq!(conflict.existing, "French");
/// assert!(find_conflict("German", &existing).is_none());
/// ```
pub fn find_conflict(language: &str, existing: &[String]) -> Option<LanguageConflict> {
    let wanted = language.to_lowercase();

    existing
        .iter()
        .find(|candidate| candidate.to_lowercase() == wanted)
        .map(|candidate| LanguageConflict {
            language: language.to_string(),
            existing: candidate.clone(),
        })
}

/// Run the conflict gate for `language`.
///
/// The prompt is only consulted when a conflict exists.
pub fn resolve_conflict(
    language: &str,
    existing: &[String],
    prompt: &dyn ConflictPrompt,
) -> ConflictDecision {
    match find_conflict(language, existing) {
        None => ConflictDecision::Proceed,
        Some(conflict) => {
            if prompt.confirm_replace(&conflict) {
                ConflictDecision::Replace(conflict)
            } else {
                ConflictDecision::Abort(conflict)
            }
        }
    }
}
