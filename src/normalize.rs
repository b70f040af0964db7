//! Canonical forms for the identifiers that link the three sheets together.

use crate::model::{CellValue, CourseCode, StudentId};

/// Canonicalises a course code: commas become `|` and surrounding whitespace
/// is trimmed. Falsy cells yield an empty string.
///
/// `AI3001,BAI-5A` → `AI3001|BAI-5A`.
pub fn normalize_course_code(raw: &CellValue) -> CourseCode {
    if !raw.is_truthy() {
        return String::new();
    }
    raw.to_string().replace(',', "|").trim().to_string()
}

/// Canonicalises a roll number: every hyphen is removed and surrounding
/// whitespace is trimmed. Case is preserved, so `20p-0048` → `20p0048`.
pub fn normalize_student_id(raw: &CellValue) -> StudentId {
    if !raw.is_truthy() {
        return String::new();
    }
    raw.to_string().replace('-', "").trim().to_string()
}
