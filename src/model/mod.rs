use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Canonical course identifier as produced by
/// [`normalize_course_code`](crate::normalize::normalize_course_code).
pub type CourseCode = String;

/// Canonical roll number as produced by
/// [`normalize_student_id`](crate::normalize::normalize_student_id).
pub type StudentId = String;

/// Course registry keyed by canonical code.
pub type CourseTable = BTreeMap<CourseCode, Course>;

/// Roll number → enrolled course codes, in sheet order. Repeats are kept.
pub type EnrollmentMap = BTreeMap<StudentId, Vec<CourseCode>>;

/// A decoded spreadsheet cell.
///
/// Date and duration cells arrive as their serial number, so they surface as
/// [`CellValue::Float`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Loose truthiness used to decide whether an identifier cell is present.
    /// Empty cells, empty strings, zero, `NaN` and `false` do not count.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(value) => *value,
            CellValue::Int(value) => *value != 0,
            CellValue::Float(value) => *value != 0.0 && !value.is_nan(),
            CellValue::String(value) => !value.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) if value.is_infinite() => {
                let sign = if value.is_sign_negative() { "-" } else { "" };
                write!(f, "{sign}Infinity")
            }
            CellValue::Float(value) if uses_exponent(*value) => {
                let text = format!("{value:e}");
                match text.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                        write!(f, "{mantissa}e+{exponent}")
                    }
                    _ => f.write_str(&text),
                }
            }
            // `f64` display already drops the fractional part of integral values.
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::String(value) => f.write_str(value),
        }
    }
}

/// Very large and very small magnitudes print in exponent form (`1e+21`,
/// `1e-7`), like spreadsheet tooling does.
fn uses_exponent(value: f64) -> bool {
    let magnitude = value.abs();
    magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6)
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// The three logical sheets of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SheetRole {
    Courses,
    Slots,
    Enrollments,
}

impl SheetRole {
    /// Roles in processing order.
    pub const ALL: [SheetRole; 3] = [SheetRole::Courses, SheetRole::Slots, SheetRole::Enrollments];

    /// Exact sheet name looked up first.
    pub fn sheet_name(self) -> &'static str {
        match self {
            SheetRole::Courses => "Courses",
            SheetRole::Slots => "Slots",
            SheetRole::Enrollments => "Enrollments",
        }
    }

    /// Position used when no sheet carries the expected name.
    pub fn position(self) -> usize {
        match self {
            SheetRole::Courses => 0,
            SheetRole::Slots => 1,
            SheetRole::Enrollments => 2,
        }
    }
}

impl fmt::Display for SheetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Entry of the course registry. Both attributes are copied from the sheet
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<CellValue>,
}

/// A scheduled slot whose course code is known to exist in the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<CellValue>,
    pub code: CourseCode,
    /// Sourced from the `location` column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<CellValue>,
    /// Sourced from the `Slots` column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<CellValue>,
}

/// What went wrong with a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    MissingCode,
    UnknownCode(CourseCode),
}

/// Non-fatal diagnostic for one spreadsheet row.
///
/// `row` is the 1-based spreadsheet row with the header counted as row 1, so
/// the first data record is row 2. Serialises as its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub sheet: SheetRole,
    pub row: usize,
    pub problem: RowProblem,
}

impl RowError {
    /// Builds an error for the record at `ordinal` (0-based) of `sheet`.
    pub fn at(sheet: SheetRole, ordinal: usize, problem: RowProblem) -> Self {
        Self {
            sheet,
            row: ordinal + 2,
            problem,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} in {}: ", self.row, self.sheet)?;
        match &self.problem {
            RowProblem::MissingCode => f.write_str("Missing code"),
            RowProblem::UnknownCode(code) => write!(f, "Code '{code}' not found in Courses"),
        }
    }
}

impl Serialize for RowError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sizes of the three collections of a [`ParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub courses: usize,
    pub slots: usize,
    pub students: usize,
}

/// Everything one parse produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParseResult {
    pub courses: CourseTable,
    pub slots: Vec<Slot>,
    pub enrollments: EnrollmentMap,
    pub counts: Counts,
    pub errors: Vec<RowError>,
}

impl ParseResult {
    /// Assembles a result, deriving the counts from the collections.
    pub fn new(
        courses: CourseTable,
        slots: Vec<Slot>,
        enrollments: EnrollmentMap,
        errors: Vec<RowError>,
    ) -> Self {
        let counts = Counts {
            courses: courses.len(),
            slots: slots.len(),
            students: enrollments.len(),
        };
        Self {
            courses,
            slots,
            enrollments,
            counts,
            errors,
        }
    }
}

/// The dataset currently published to readers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    pub courses: CourseTable,
    pub slots: Vec<Slot>,
    pub enrollments: EnrollmentMap,
    /// `false` until the first successful upload.
    pub processed: bool,
}

/// Response body of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub courses: usize,
    pub slots: usize,
    pub students: usize,
    pub errors: Vec<RowError>,
}
