use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use tempfile::tempdir;
use timetable_ingest::io::excel_read;
use timetable_ingest::{CellValue, Counts, DatasetStore, IngestError, parse};

enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

use Cell::{Blank, Number, Text};

fn build_xlsx(sheets: &[(&str, Vec<Vec<Cell>>)]) -> Vec<u8> {
    let mut workbook = XlsxWorkbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet named");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                match cell {
                    Text(value) => {
                        worksheet
                            .write_string(row_idx, col_idx, *value)
                            .expect("string written");
                    }
                    Number(value) => {
                        worksheet
                            .write_number(row_idx, col_idx, *value)
                            .expect("number written");
                    }
                    Blank => {}
                }
            }
        }
    }
    workbook.save_to_buffer().expect("workbook serialised")
}

fn timetable() -> Vec<u8> {
    build_xlsx(&[
        (
            "Courses",
            vec![
                vec![Text("code"), Text("subject"), Text("teacher")],
                vec![Text("CS101"), Text("Algo"), Text("X")],
            ],
        ),
        (
            "Slots",
            vec![
                vec![
                    Text("day"),
                    Text("slot"),
                    Text("code"),
                    Text("location"),
                    Text("Slots"),
                ],
                vec![Text("Mon"), Number(1.0), Text("CS101"), Text("R1"), Text("9-10")],
            ],
        ),
        (
            "Enrollments",
            vec![
                vec![Text("rollnumber"), Text("code")],
                vec![Text("20p-0001"), Text("CS101")],
                vec![Text("20p-0001"), Text("CS999")],
            ],
        ),
    ])
}

#[test]
fn xlsx_upload_end_to_end() {
    let result = parse(&timetable()).expect("workbook parsed");

    assert_eq!(
        result.counts,
        Counts {
            courses: 1,
            slots: 1,
            students: 1
        }
    );
    let slot = &result.slots[0];
    assert_eq!(slot.code, "CS101");
    assert_eq!(slot.slot, Some(CellValue::Float(1.0)));
    assert_eq!(slot.room, Some(CellValue::from("R1")));
    assert_eq!(slot.time, Some(CellValue::from("9-10")));
    assert_eq!(result.enrollments["20p0001"], vec!["CS101"]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].to_string(),
        "Row 3 in Enrollments: Code 'CS999' not found in Courses"
    );
}

#[test]
fn numeric_identifiers_use_their_text_form() {
    let bytes = build_xlsx(&[
        (
            "Courses",
            vec![vec![Text("code"), Text("subject")], vec![Number(101.0), Text("Intro")]],
        ),
        ("Slots", vec![vec![Text("code")], vec![Text("101")]]),
        (
            "Enrollments",
            vec![
                vec![Text("rollnumber"), Text("code")],
                vec![Number(20010001.0), Number(101.0)],
            ],
        ),
    ]);

    let result = parse(&bytes).expect("workbook parsed");

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert!(result.courses.contains_key("101"));
    assert_eq!(result.slots[0].code, "101");
    assert_eq!(result.enrollments["20010001"], vec!["101"]);
}

#[test]
fn blank_rows_do_not_shift_row_numbers() {
    let bytes = build_xlsx(&[(
        "Courses",
        vec![
            vec![Text("code"), Text("subject")],
            vec![Text("CS101"), Text("Algo")],
            vec![Blank, Blank],
            vec![Blank, Text("No code")],
        ],
    )]);

    let result = parse(&bytes).expect("workbook parsed");

    assert_eq!(result.counts.courses, 1);
    let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Row 3 in Courses: Missing code"]);
}

#[test]
fn zero_code_counts_as_missing() {
    let bytes = build_xlsx(&[(
        "Courses",
        vec![vec![Text("code")], vec![Number(0.0)], vec![Text("CS101")]],
    )]);

    let result = parse(&bytes).expect("workbook parsed");

    assert_eq!(result.counts.courses, 1);
    assert_eq!(result.errors[0].to_string(), "Row 2 in Courses: Missing code");
}

#[test]
fn duration_cells_stay_numeric() {
    let duration = Format::new().set_num_format("[h]:mm");
    let mut workbook = XlsxWorkbook::new();
    let courses = workbook.add_worksheet();
    courses.set_name("Courses").expect("sheet named");
    courses.write_string(0, 0, "code").expect("string written");
    courses.write_string(1, 0, "CS101").expect("string written");
    courses
        .write_number_with_format(2, 0, 0.0, &duration)
        .expect("duration written");
    let slots = workbook.add_worksheet();
    slots.set_name("Slots").expect("sheet named");
    slots.write_string(0, 0, "code").expect("string written");
    slots.write_string(0, 1, "Slots").expect("string written");
    slots.write_string(1, 0, "CS101").expect("string written");
    slots
        .write_number_with_format(1, 1, 0.375, &duration)
        .expect("duration written");
    let bytes = workbook.save_to_buffer().expect("workbook serialised");

    let result = parse(&bytes).expect("workbook parsed");

    assert_eq!(result.slots[0].time, Some(CellValue::Float(0.375)));
    let json = serde_json::to_value(&result.slots[0]).expect("slot serialised");
    assert_eq!(json["time"], serde_json::json!(0.375));
    // A zero duration is as missing as a plain zero.
    assert_eq!(result.counts.courses, 1);
    let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Row 3 in Courses: Missing code"]);
}

#[test]
fn read_workbook_from_disk_keeps_sheet_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("timetable.xlsx");
    std::fs::write(&path, timetable()).expect("workbook written");

    let workbook = excel_read::read_workbook(&path).expect("workbook read");
    let names: Vec<&str> = workbook.sheets().iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["Courses", "Slots", "Enrollments"]);
}

#[test]
fn garbage_bytes_are_fatal() {
    let error = parse(b"definitely not a spreadsheet").expect_err("decode fails");
    assert!(matches!(error, IngestError::InvalidWorkbook(_)));

    let mut truncated = timetable();
    truncated.truncate(64);
    assert!(parse(&truncated).is_err());
}

#[test]
fn store_starts_empty_and_replaces_on_upload() {
    let store = DatasetStore::new();
    let initial = store.snapshot();
    assert!(!initial.processed);
    assert!(initial.courses.is_empty());

    let summary = store.ingest(&timetable()).expect("upload accepted");
    assert_eq!((summary.courses, summary.slots, summary.students), (1, 1, 1));
    assert_eq!(summary.errors.len(), 1);

    let dataset = store.snapshot();
    assert!(dataset.processed);
    assert!(dataset.courses.contains_key("CS101"));
    assert_eq!(dataset.slots.len(), 1);

    let replacement = build_xlsx(&[("Courses", vec![vec![Text("code")], vec![Text("EE200")]])]);
    store.ingest(&replacement).expect("second upload accepted");
    let dataset = store.snapshot();
    assert_eq!(dataset.courses.keys().collect::<Vec<_>>(), vec!["EE200"]);
    assert!(dataset.slots.is_empty());
    assert!(dataset.enrollments.is_empty());
}

#[test]
fn failed_upload_leaves_store_untouched() {
    let store = DatasetStore::new();
    store.ingest(&timetable()).expect("upload accepted");
    let before = store.snapshot();

    assert!(store.ingest(b"not a workbook").is_err());
    assert!(store.ingest(b"PK\x03\x04broken").is_err());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn summary_serialises_like_upload_response() {
    let store = DatasetStore::new();
    let summary = store.ingest(&timetable()).expect("upload accepted");

    let json = serde_json::to_value(&summary).expect("summary serialised");

    assert_eq!(
        json,
        serde_json::json!({
            "courses": 1,
            "slots": 1,
            "students": 1,
            "errors": ["Row 3 in Enrollments: Code 'CS999' not found in Courses"]
        })
    );
}
