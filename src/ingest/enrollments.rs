use tracing::trace;

use crate::model::{CellValue, CourseTable, EnrollmentMap, RowError, RowProblem, SheetRole};
use crate::normalize::{normalize_course_code, normalize_student_id};
use crate::sheets::RowRecord;

/// Typed view of an Enrollments record. Both fields are `None` when missing
/// or falsy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrollmentRow {
    pub rollnumber: Option<CellValue>,
    pub code: Option<CellValue>,
}

impl From<&RowRecord> for EnrollmentRow {
    fn from(record: &RowRecord) -> Self {
        Self {
            rollnumber: record.truthy("rollnumber").cloned(),
            code: record.truthy("code").cloned(),
        }
    }
}

/// Builds the roll number → course codes map.
///
/// Rows lacking either a roll number or a code are dropped without a
/// diagnostic, unlike the other two sheets.
pub fn build_enrollments(
    records: &[RowRecord],
    courses: &CourseTable,
) -> (EnrollmentMap, Vec<RowError>) {
    let mut enrollments = EnrollmentMap::new();
    let mut errors = Vec::new();

    for (ordinal, row) in records.iter().map(EnrollmentRow::from).enumerate() {
        let (Some(raw_roll), Some(raw_code)) = (row.rollnumber, row.code) else {
            trace!(row = ordinal + 2, "skipping incomplete enrollment row");
            continue;
        };

        let roll = normalize_student_id(&raw_roll);
        let code = normalize_course_code(&raw_code);
        if !courses.contains_key(&code) {
            errors.push(RowError::at(
                SheetRole::Enrollments,
                ordinal,
                RowProblem::UnknownCode(code),
            ));
            continue;
        }

        enrollments.entry(roll).or_default().push(code);
    }

    (enrollments, errors)
}
