use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::error::Result;
use crate::model::{Dataset, ParseResult, UploadSummary};
use crate::pipeline;

/// Owner of the dataset currently published to readers.
///
/// The dataset is only ever swapped whole, so readers never observe a mix of
/// two uploads. Concurrent uploads are not coordinated: the last commit wins.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Dataset>,
}

impl DatasetStore {
    /// Creates a store holding an empty, unprocessed dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` and publishes the result. A failed parse leaves the
    /// current dataset as it was.
    pub fn ingest(&self, bytes: &[u8]) -> Result<UploadSummary> {
        let result = pipeline::parse(bytes)?;
        Ok(self.commit(result))
    }

    /// Replaces the current dataset with `result` and returns the upload
    /// summary for it.
    pub fn commit(&self, result: ParseResult) -> UploadSummary {
        let summary = UploadSummary {
            courses: result.counts.courses,
            slots: result.counts.slots,
            students: result.counts.students,
            errors: result.errors,
        };
        let dataset = Dataset {
            courses: result.courses,
            slots: result.slots,
            enrollments: result.enrollments,
            processed: true,
        };

        // The dataset is swapped whole, so a poisoned lock still guards a complete one.
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = dataset;
        info!(
            courses = summary.courses,
            slots = summary.slots,
            students = summary.students,
            "dataset replaced"
        );
        summary
    }

    /// Copy of the current dataset.
    pub fn snapshot(&self) -> Dataset {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
