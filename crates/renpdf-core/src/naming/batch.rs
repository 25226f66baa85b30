//! Sequential batch processing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::dispatcher::CaseDispatcher;
use crate::error::ExtractionError;
use crate::models::outcome::{DocumentCategory, RenameOutcome};
use crate::pdf::TextSource;

/// Receives a renamed document.
pub trait FileSink {
    fn deliver(&mut self, source: &Path, destination: &Path) -> io::Result<()>;
}

/// Copies documents, leaving the source in place. The copy keeps the
/// source's modification time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopySink;

impl FileSink for CopySink {
    fn deliver(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        fs::copy(source, destination)?;
        let modified = fs::metadata(source)?.modified()?;
        fs::OpenOptions::new()
            .write(true)
            .open(destination)?
            .set_modified(modified)
    }
}

/// Outcomes of a batch, one per input document in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
}

impl BatchReport {
    pub fn renamed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.renamed()
    }
}

/// Process `files` one after the other into `output_dir`.
///
/// Each document is delivered before the next one is named, so collisions
/// within the batch are seen. A failing document never stops the batch.
pub fn run_batch<S, K, F>(
    dispatcher: &CaseDispatcher,
    category: DocumentCategory,
    files: &[PathBuf],
    source: &S,
    output_dir: &Path,
    sink: &mut K,
    mut on_outcome: F,
) -> BatchReport
where
    S: TextSource + ?Sized,
    K: FileSink + ?Sized,
    F: FnMut(&RenameOutcome),
{
    let mut report = BatchReport::default();

    for path in files {
        let mut outcome = dispatcher.process(category, path, source, output_dir);

        if outcome.is_ok() {
            let destination = output_dir.join(&outcome.new_name);
            if let Err(e) = sink.deliver(path, &destination) {
                warn!("Failed to write {}: {}", destination.display(), e);
                outcome = RenameOutcome::failed(
                    outcome.original_name,
                    ExtractionError::Unexpected(format!("could not write {}: {}", outcome.new_name, e)),
                );
            }
        }

        on_outcome(&outcome);
        report.outcomes.push(outcome);
    }

    info!(
        "Batch finished: {} renamed, {} failed",
        report.renamed(),
        report.failed()
    );
    report
}
