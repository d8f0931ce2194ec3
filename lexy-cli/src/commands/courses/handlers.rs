//! Course command handlers.

use lexy::importer::{
    AutoConfirm, ConflictPrompt, ImportOutcome, ImportPipeline, ImportedCourse, LanguageConflict,
};
use lexy::library::{CourseLibrary, DeliveryReport, StoredCourse};
use lexy::package::SegmentKind;
use tracing::{error, warn};

use super::args::{ImportArgs, InfoArgs, ListArgs, RemoveArgs};
use super::traits::{CommandContext, CommandHandler, Output};
use crate::error::CliError;

/// File extensions offered for package selection.
const PACKAGE_EXTENSIONS: &[&str] = &["lexy", "zip"];

/// Imports a package into the library.
pub struct ImportHandler;

impl CommandHandler for ImportHandler {
    type Args = ImportArgs;

    fn execute(args: ImportArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let has_package_extension = args
            .package
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| PACKAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !has_package_extension {
            warn!(
                path = %args.package.display(),
                "Package does not have a .lexy or .zip extension, trying anyway"
            );
        }

        let mut library = CourseLibrary::open(&args.library_dir)?;
        let existing = library.languages()?;

        let progress = ctx.output.import_progress(&format!(
            "Importing {}",
            args.package.display()
        ));
        let reporter = progress.clone();
        let pipeline = ImportPipeline::new(args.config)
            .with_progress(Box::new(move |stage, message| reporter.stage(stage, message)));

        let ask = |conflict: &LanguageConflict| {
            let mut answer = false;
            progress.suspend(&mut || {
                answer = ctx.interaction.confirm(&conflict.prompt_message());
            });
            answer
        };
        let prompt: &dyn ConflictPrompt = if args.auto_confirm {
            &AutoConfirm as &dyn ConflictPrompt
        } else {
            &ask
        };

        let outcome = pipeline.import_file(&args.package, &existing, prompt);
        progress.finish();

        let imported = match outcome {
            Ok(ImportOutcome::Imported(imported)) => imported,
            Ok(ImportOutcome::Cancelled(_)) => {
                ctx.output.println("Import cancelled.");
                return Ok(());
            }
            Err(e) => {
                error!(
                    path = %args.package.display(),
                    kind = ?e.kind(),
                    error = %e,
                    "Import failed"
                );
                return Err(e.into());
            }
        };

        print_import_summary(ctx.output, &imported);
        let report = pipeline.deliver(imported, &mut library)?;
        print_delivery(ctx.output, &report);

        Ok(())
    }
}

fn print_import_summary(out: &dyn Output, imported: &ImportedCourse) {
    let course = &imported.course;
    let stats = &imported.stats;

    out.header("Course Imported");
    out.newline();
    out.println(&format!("Title:     {}", course.course_title));
    out.println(&format!("Language:  {}", course.language));
    out.println(&format!("Id:        {}", course.id));
    if let Some(ref sha) = stats.package_sha256 {
        out.println(&format!("SHA-256:   {}", sha));
    }

    out.subheader("Contents");
    out.println(&format!("Units:          {}", course.units.len()));
    out.println(&format!("Dictionary:     {}", course.dictionary.len()));
    out.println(&format!("Grammar:        {}", course.grammar.len()));
    out.println(&format!("Culture items:  {}", course.culture_items.len()));
    out.println(&format!("Assets inlined: {}", stats.assets.resolved));

    if !stats.segments.dangling.is_empty() {
        out.newline();
        for (kind, path) in &stats.segments.dangling {
            out.warning(&format!("{} data file {} is missing from the package", kind, path));
        }
    }
    if !stats.assets.missing.is_empty() {
        out.newline();
        out.warning(&format!(
            "{} asset reference(s) could not be resolved:",
            stats.assets.missing.len()
        ));
        for missing in &stats.assets.missing {
            out.indented(&missing.to_string());
        }
    }
}

fn print_delivery(out: &dyn Output, report: &DeliveryReport) {
    out.newline();
    if report.replaced_existing() {
        out.println(&format!("Replaced: {}", report.replaced.join(", ")));
    }
    out.println(&format!("Saved to {}", report.path.display()));
}

/// Lists imported courses.
pub struct ListHandler;

impl CommandHandler for ListHandler {
    type Args = ListArgs;

    fn execute(args: ListArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let library = CourseLibrary::open(&args.library_dir)?;
        let courses = library.list()?;

        if courses.is_empty() {
            ctx.output.println("No courses in library.");
            ctx.output.println(&format!(
                "Import one with: lexy import <package.lexy> --library-dir {}",
                args.library_dir.display()
            ));
            return Ok(());
        }

        ctx.output.header("Courses");
        ctx.output.newline();
        for course in &courses {
            ctx.output
                .println(&format!("{} - {} ({})", course.language, course.title, course.id));
            if args.long {
                ctx.output.indented(&format!(
                    "{} units, {} words, {} grammar, {} culture items",
                    course.units, course.dictionary, course.grammar, course.culture_items
                ));
                ctx.output.indented(&format!(
                    "Imported {}",
                    course.imported_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
        }
        ctx.output.newline();
        ctx.output.println(&format!("{} course(s)", courses.len()));

        Ok(())
    }
}

/// Shows one course.
pub struct InfoHandler;

impl CommandHandler for InfoHandler {
    type Args = InfoArgs;

    fn execute(args: InfoArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let library = CourseLibrary::open(&args.library_dir)?;
        let stored = library.get(&args.id)?;
        print_course_info(ctx.output, &stored);
        Ok(())
    }
}

fn print_course_info(out: &dyn Output, stored: &StoredCourse) {
    out.header(&stored.course_title);
    out.newline();
    out.println(&format!("Id:        {}", stored.id));
    out.println(&format!("Language:  {}", stored.language));
    out.println(&format!("Imported:  {}", stored.imported_at.to_rfc3339()));

    out.subheader("Contents");
    for kind in SegmentKind::ALL {
        let count = match kind {
            SegmentKind::Dictionary => stored.dictionary.len(),
            SegmentKind::Grammar => stored.grammar.len(),
            SegmentKind::Culture => stored.culture_items.len(),
            SegmentKind::Units => stored.units.len(),
        };
        out.println(&format!("{:<12}{}", format!("{}:", kind), count));
    }

    if !stored.culture_items.is_empty() {
        out.subheader("Culture");
        for item in &stored.culture_items {
            out.indented(&format!(
                "[{}] {} ({} assets)",
                item.category().unwrap_or("-"),
                item.title().unwrap_or("(untitled)"),
                item.asset_records().len()
            ));
        }
    }
}

/// Removes a course.
pub struct RemoveHandler;

impl CommandHandler for RemoveHandler {
    type Args = RemoveArgs;

    fn execute(args: RemoveArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let library = CourseLibrary::open(&args.library_dir)?;
        let stored = library.get(&args.id)?;

        if !args.force {
            let prompt = format!(
                "Remove \"{}\" ({})? This cannot be undone.",
                stored.course_title, stored.language
            );
            if !ctx.interaction.confirm(&prompt) {
                ctx.output.println("Cancelled.");
                return Ok(());
            }
        }

        let summary = library.remove(&args.id)?;
        ctx.output
            .println(&format!("Removed {} ({})", summary.title, summary.language));
        Ok(())
    }
}
