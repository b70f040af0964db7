use crate::model::{CellValue, CourseTable, RowError, RowProblem, SheetRole, Slot};
use crate::normalize::normalize_course_code;
use crate::sheets::RowRecord;

/// Typed view of a Slots record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotRow {
    pub day: Option<CellValue>,
    pub slot: Option<CellValue>,
    pub code: Option<CellValue>,
    pub location: Option<CellValue>,
    /// The time range, stored under a column literally named `Slots`.
    pub time: Option<CellValue>,
}

impl From<&RowRecord> for SlotRow {
    fn from(record: &RowRecord) -> Self {
        Self {
            day: record.get("day").cloned(),
            slot: record.get("slot").cloned(),
            code: record.truthy("code").cloned(),
            location: record.get("location").cloned(),
            time: record.get("Slots").cloned(),
        }
    }
}

/// Builds the slot list, keeping only rows whose code is a registered course.
pub fn build_slots(records: &[RowRecord], courses: &CourseTable) -> (Vec<Slot>, Vec<RowError>) {
    let mut slots = Vec::new();
    let mut errors = Vec::new();

    for (ordinal, row) in records.iter().map(SlotRow::from).enumerate() {
        let Some(raw_code) = row.code else {
            errors.push(RowError::at(SheetRole::Slots, ordinal, RowProblem::MissingCode));
            continue;
        };

        let code = normalize_course_code(&raw_code);
        if !courses.contains_key(&code) {
            errors.push(RowError::at(
                SheetRole::Slots,
                ordinal,
                RowProblem::UnknownCode(code),
            ));
            continue;
        }

        slots.push(Slot {
            day: row.day,
            slot: row.slot,
            code,
            room: row.location,
            time: row.time,
        });
    }

    (slots, errors)
}
