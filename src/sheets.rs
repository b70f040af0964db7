//! In-memory workbook representation and the lookup of the three logical
//! sheets inside it.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::model::{CellValue, SheetRole};

/// Name given to columns whose header cell is blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// A decoded workbook: its sheets in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Resolves the sheet backing `role`: an exact name match wins, otherwise
    /// the sheet at the role's position, otherwise nothing.
    pub fn sheet_for(&self, role: SheetRole) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == role.sheet_name())
            .or_else(|| self.sheets.get(role.position()))
    }

    /// Data records of the sheet backing `role`. A workbook without such a
    /// sheet simply yields no records.
    pub fn records(&self, role: SheetRole) -> Vec<RowRecord> {
        match self.sheet_for(role) {
            Some(sheet) => {
                debug!(%role, sheet = %sheet.name, "resolved sheet");
                sheet.records()
            }
            None => {
                debug!(%role, "no sheet available, treating as empty");
                Vec::new()
            }
        }
    }
}

/// A single worksheet; the first row is the header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Converts the data rows into records keyed by header name. Rows with no
    /// populated cell are dropped and do not count towards record positions.
    pub fn records(&self) -> Vec<RowRecord> {
        let mut rows = self.rows.iter();
        let headers = match rows.next() {
            Some(header_row) => header_names(header_row),
            None => return Vec::new(),
        };

        rows.filter_map(|row| {
            let fields: BTreeMap<String, CellValue> = headers
                .iter()
                .zip(row)
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(header, cell)| (header.clone(), cell.clone()))
                .collect();
            (!fields.is_empty()).then_some(RowRecord { fields })
        })
        .collect()
    }
}

/// Header cell text, with blanks named [`EMPTY_HEADER`] and repeats suffixed
/// `_1`, `_2`, ...
fn header_names(row: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .map(|cell| {
            let text = cell.to_string();
            let base = if text.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// One data row exposed as named fields. Only populated cells are present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowRecord {
    fields: BTreeMap<String, CellValue>,
}

impl RowRecord {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// The field value, but only when it is truthy.
    pub fn truthy(&self, field: &str) -> Option<&CellValue> {
        self.get(field).filter(|value| value.is_truthy())
    }
}

impl<K, V> FromIterator<(K, V)> for RowRecord
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        Self { fields }
    }
}
