//! Terminal implementations of the command traits.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use lexy::importer::ImportStage;

use super::traits::{ImportProgress, Interaction, Output};

/// Writes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for ConsoleOutput {
    fn println(&self, msg: &str) {
        println!("{}", msg);
    }

    fn newline(&self) {
        println!();
    }

    fn header(&self, title: &str) {
        println!("{}", style(title).bold());
        println!("{}", "=".repeat(title.chars().count()));
    }

    fn subheader(&self, title: &str) {
        println!();
        println!("{}", style(title).bold());
        println!("{}", "-".repeat(title.chars().count()));
    }

    fn indented(&self, msg: &str) {
        println!("  {}", msg);
    }

    fn warning(&self, msg: &str) {
        println!("{} {}", style("warning:").yellow().bold(), msg);
    }

    fn import_progress(&self, message: &str) -> Arc<dyn ImportProgress> {
        Arc::new(SpinnerProgress::new(message))
    }
}

/// Spinner showing the latest completed stage.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl ImportProgress for SpinnerProgress {
    fn stage(&self, stage: ImportStage, message: &str) {
        self.bar
            .set_message(format!("{}: {}", stage.name(), message));
    }

    fn suspend(&self, f: &mut dyn FnMut()) {
        self.bar.suspend(|| f());
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Asks questions on the terminal.
#[derive(Debug, Default)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl Interaction for ConsoleInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        // A closed or non-interactive terminal counts as "no".
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
