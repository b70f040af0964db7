use tracing::debug;

use crate::model::{CellValue, Course, CourseTable, RowError, RowProblem, SheetRole};
use crate::normalize::normalize_course_code;
use crate::sheets::RowRecord;

/// Typed view of a Courses record. `code` is `None` when missing or falsy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseRow {
    pub code: Option<CellValue>,
    pub subject: Option<CellValue>,
    pub teacher: Option<CellValue>,
}

impl From<&RowRecord> for CourseRow {
    fn from(record: &RowRecord) -> Self {
        Self {
            code: record.truthy("code").cloned(),
            subject: record.get("subject").cloned(),
            teacher: record.get("teacher").cloned(),
        }
    }
}

/// Builds the course registry. A repeated code silently replaces the earlier
/// entry.
pub fn build_courses(records: &[RowRecord]) -> (CourseTable, Vec<RowError>) {
    let mut courses = CourseTable::new();
    let mut errors = Vec::new();

    for (ordinal, row) in records.iter().map(CourseRow::from).enumerate() {
        let Some(raw_code) = row.code else {
            errors.push(RowError::at(SheetRole::Courses, ordinal, RowProblem::MissingCode));
            continue;
        };

        let code = normalize_course_code(&raw_code);
        let course = Course {
            subject: row.subject,
            teacher: row.teacher,
        };
        if courses.insert(code.clone(), course).is_some() {
            debug!(%code, row = ordinal + 2, "course code repeated, keeping later row");
        }
    }

    (courses, errors)
}
