use std::io::Cursor;
use std::path::Path;

use calamine::{DataType, Ods, Reader, Sheets, Xls, Xlsb, Xlsx};
use tracing::{debug, instrument};

use crate::error::{IngestError, Result};
use crate::model::CellValue;
use crate::sheets::{Sheet, Workbook};

type Container = Sheets<Cursor<Vec<u8>>>;

/// Compound File Binary signature used by legacy `.xls` files.
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// Local file header signature shared by xlsx, xlsb and ods packages.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Reads a workbook from disk.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let bytes = std::fs::read(path)?;
    decode_workbook(&bytes)
}

/// Decodes a spreadsheet buffer and materialises every sheet in file order.
#[instrument(level = "debug", skip_all, fields(size = bytes.len()))]
pub fn decode_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut container = open_container(bytes)?;
    let names = container.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = container
            .worksheet_range(&name)
            .ok_or_else(|| IngestError::InvalidWorkbook(format!("missing sheet '{name}'")))?
            .map_err(IngestError::from)?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_value).collect())
            .collect::<Vec<Vec<CellValue>>>();
        debug!(sheet = %name, rows = rows.len(), "decoded sheet");
        sheets.push(Sheet::new(name, rows));
    }

    Ok(Workbook::new(sheets))
}

fn open_container(bytes: &[u8]) -> Result<Container> {
    if bytes.starts_with(&CFB_MAGIC) {
        let xls = Xls::new(cursor(bytes)).map_err(calamine::Error::from)?;
        return Ok(Sheets::Xls(xls));
    }

    if !bytes.starts_with(&ZIP_MAGIC) {
        return Err(IngestError::InvalidWorkbook(
            "unrecognised spreadsheet container".into(),
        ));
    }

    let xlsx_error = match Xlsx::new(cursor(bytes)) {
        Ok(xlsx) => return Ok(Sheets::Xlsx(xlsx)),
        Err(error) => error,
    };
    if let Ok(xlsb) = Xlsb::new(cursor(bytes)) {
        return Ok(Sheets::Xlsb(xlsb));
    }
    if let Ok(ods) = Ods::new(cursor(bytes)) {
        return Ok(Sheets::Ods(ods));
    }
    Err(calamine::Error::from(xlsx_error).into())
}

fn cursor(bytes: &[u8]) -> Cursor<Vec<u8>> {
    Cursor::new(bytes.to_vec())
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) => CellValue::String(value.clone()),
        DataType::Float(value) | DataType::DateTime(value) | DataType::Duration(value) => {
            CellValue::Float(*value)
        }
        DataType::Int(value) => CellValue::Int(*value),
        DataType::Bool(value) => CellValue::Bool(*value),
        other => CellValue::String(other.to_string()),
    }
}
