//! Core library for the timetable-ingest command line application.
//!
//! An upload is a three-sheet workbook (courses, slots, enrollments). The
//! library decodes it ([`io`]), resolves the three sheets ([`sheets`]),
//! canonicalises identifiers ([`normalize`]), builds and cross-validates the
//! collections ([`ingest`]) and hands back a [`ParseResult`] from
//! [`pipeline::parse`]. [`store::DatasetStore`] holds the most recently
//! published dataset.

pub mod error;
pub mod ingest;
pub mod io;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod sheets;
pub mod store;

pub use error::{IngestError, Result};
pub use model::{
    CellValue, Counts, Course, Dataset, ParseResult, RowError, RowProblem, SheetRole, Slot,
    UploadSummary,
};
pub use pipeline::{parse, parse_workbook};
pub use store::DatasetStore;
