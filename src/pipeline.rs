use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::ingest::{build_courses, build_enrollments, build_slots};
use crate::io::excel_read;
use crate::model::{ParseResult, SheetRole};
use crate::sheets::Workbook;

/// Decodes a spreadsheet buffer and runs the ingest pipeline over it.
///
/// Only undecodable input fails; every row-level problem ends up in
/// [`ParseResult::errors`].
#[instrument(level = "info", skip_all, fields(size = bytes.len()))]
pub fn parse(bytes: &[u8]) -> Result<ParseResult> {
    let workbook = excel_read::decode_workbook(bytes)?;
    Ok(parse_workbook(&workbook))
}

/// Runs the ingest pipeline over an already decoded workbook.
#[instrument(level = "debug", skip_all, fields(sheets = workbook.sheets().len()))]
pub fn parse_workbook(workbook: &Workbook) -> ParseResult {
    let (courses, mut errors) = build_courses(&workbook.records(SheetRole::Courses));
    info!(courses = courses.len(), "built course registry");

    let (slots, slot_errors) = build_slots(&workbook.records(SheetRole::Slots), &courses);
    info!(slots = slots.len(), rejected = slot_errors.len(), "built slot list");
    errors.extend(slot_errors);

    let (enrollments, enrollment_errors) =
        build_enrollments(&workbook.records(SheetRole::Enrollments), &courses);
    info!(
        students = enrollments.len(),
        rejected = enrollment_errors.len(),
        "built enrollment map"
    );
    errors.extend(enrollment_errors);

    for error in &errors {
        debug!(%error, "row rejected");
    }
    if errors.is_empty() {
        info!("workbook ingested cleanly");
    } else {
        warn!(errors = errors.len(), "workbook ingested with row errors");
    }

    ParseResult::new(courses, slots, enrollments, errors)
}
