//! Interfaces the course command handlers depend on.

use std::sync::Arc;

use lexy::importer::ImportStage;

use crate::error::CliError;

/// Text output sink.
pub trait Output {
    fn println(&self, msg: &str);
    fn newline(&self);
    fn header(&self, title: &str);
    fn subheader(&self, title: &str);
    fn indented(&self, msg: &str);
    fn warning(&self, msg: &str);

    /// Start a progress display for an import.
    fn import_progress(&self, message: &str) -> Arc<dyn ImportProgress>;
}

/// Live progress display for one import.
pub trait ImportProgress: Send + Sync {
    /// A pipeline stage completed.
    fn stage(&self, stage: ImportStage, message: &str);

    /// Run `f` with the display hidden, e.g. while prompting.
    fn suspend(&self, f: &mut dyn FnMut());

    /// Remove the display.
    fn finish(&self);
}

/// User interaction.
pub trait Interaction {
    /// Ask a yes/no question. Declining is the default.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Dependencies available to command handlers.
pub struct CommandContext<'a> {
    pub output: &'a dyn Output,
    pub interaction: &'a dyn Interaction,
}

impl<'a> CommandContext<'a> {
    pub fn new(output: &'a dyn Output, interaction: &'a dyn Interaction) -> Self {
        Self {
            output,
            interaction,
        }
    }
}

/// A command with its own argument type.
pub trait CommandHandler {
    type Args;

    fn execute(args: Self::Args, ctx: &CommandContext) -> Result<(), CliError>;
}
