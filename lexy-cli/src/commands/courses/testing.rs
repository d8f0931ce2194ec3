//! Test doubles for the command traits.

use std::cell::RefCell;
use std::sync::Arc;

use lexy::importer::ImportStage;

use super::traits::{ImportProgress, Interaction, Output};

/// Records every line written.
#[derive(Default)]
pub struct MockOutput {
    lines: RefCell<Vec<String>>,
}

impl MockOutput {
    pub fn text(&self) -> String {
        self.lines.borrow().join("\n")
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }
}

impl Output for MockOutput {
    fn println(&self, msg: &str) {
        self.push(msg.to_string());
    }
    fn newline(&self) {}
    fn header(&self, title: &str) {
        self.push(title.to_string());
    }
    fn subheader(&self, title: &str) {
        self.push(title.to_string());
    }
    fn indented(&self, msg: &str) {
        self.push(format!("  {}", msg));
    }
    fn warning(&self, msg: &str) {
        self.push(format!("warning: {}", msg));
    }
    fn import_progress(&self, _message: &str) -> Arc<dyn ImportProgress> {
        Arc::new(SilentProgress)
    }
}

pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn stage(&self, _stage: ImportStage, _message: &str) {}
    fn suspend(&self, f: &mut dyn FnMut()) {
        f();
    }
    fn finish(&self) {}
}

/// Gives the same answer to every question and remembers the prompts.
pub struct MockInteraction {
    answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl MockInteraction {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Interaction for MockInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }
}
