use follina_inspect::{Classification, ScanResult};
use std::path::PathBuf;

/// Totals for a complete run.
///
/// Lists keep the order in which files were inspected. Since discovery is
/// deterministic (argument order, then sorted depth-first walks) so are
/// the lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files handed to the inspector.
    pub scanned: usize,
    /// Files that opened as a zip archive.
    pub documents: usize,
    /// Files classified as [`Valid`](Classification::Valid).
    pub clean: usize,
    pub suspicious: Vec<PathBuf>,
    pub infected: Vec<PathBuf>,
    /// Paths that could not be accessed at all.
    pub errors: usize,
}

/// Folds individual [`ScanResult`]s into a [`Summary`].
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    summary: Summary,
}
impl SummaryBuilder {
    pub fn record(&mut self, result: &ScanResult) {
        self.summary.scanned += 1;
        if result.classification.is_document() {
            self.summary.documents += 1;
        }
        match result.classification {
            Classification::NotApplicable => {},
            Classification::Valid => self.summary.clean += 1,
            Classification::Suspicious => self.summary.suspicious.push(result.path.clone()),
            Classification::Infected => self.summary.infected.push(result.path.clone()),
        }
    }

    pub fn access_error(&mut self) {
        self.summary.errors += 1;
    }

    pub fn finish(self) -> Summary {
        self.summary
    }
}
