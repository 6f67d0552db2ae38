use crate::stats::TestOutcome;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered view of one test invocation: the outcome plus caller-supplied
/// context (test title, descriptive notes such as sample means).
#[derive(Debug, Clone)]
pub struct TestReport {
    pub title: String,
    pub outcome: TestOutcome,
    pub notes: Vec<String>,
}

impl TestReport {
    pub fn new(title: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, report: &TestReport) -> Result<(), ReportError>;
}

mod terminal;
pub use terminal::TerminalReporter;
