//! Per-stage outcome summaries.

use std::path::PathBuf;

/// Pipeline stage names, as shown in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Stage {
    /// Story drafting
    #[display("draft")]
    Draft,
    /// Illustration
    #[display("illustrate")]
    Illustrate,
    /// PDF assembly
    #[display("assemble pdf")]
    AssemblePdf,
    /// Deck assembly
    #[display("assemble deck")]
    AssembleDeck,
}

/// One item that did not make it through a stage.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct StageFailure {
    /// Theme text or file the failure belongs to
    item: String,
    /// Error message
    reason: String,
}

/// Items written and items skipped by one stage run.
///
/// Per-item failures are recorded here instead of aborting the stage.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct StageReport {
    /// Stage that produced this report
    stage: Stage,
    /// Files written, in processing order
    succeeded: Vec<PathBuf>,
    /// Items skipped, in processing order
    failed: Vec<StageFailure>,
}

impl StageReport {
    /// Empty report for `stage`.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Records a written file.
    pub fn record_success(&mut self, path: PathBuf) {
        self.succeeded.push(path);
    }

    /// Records a skipped item.
    pub fn record_failure(&mut self, item: impl Into<String>, reason: impl std::fmt::Display) {
        self.failed.push(StageFailure {
            item: item.into(),
            reason: reason.to_string(),
        });
    }

    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl std::fmt::Display for StageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} succeeded, {} failed",
            self.stage,
            self.succeeded.len(),
            self.failed.len()
        )
    }
}
