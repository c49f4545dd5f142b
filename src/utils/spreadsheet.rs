use crate::error::ExportError;
use crate::model::attendance::{AttendanceRow, NOT_CHECKED_OUT};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "attendance_records.xlsx";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Builds a single-sheet workbook in memory: one bold header row, then one
/// row per entry. Date and timestamp columns are native Excel date cells.
pub fn build_workbook(rows: &[AttendanceRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);
    let worksheet = workbook.add_worksheet();

    for (col, title) in (0u16..).zip(AttendanceRow::HEADERS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
        worksheet.set_column_width(col, 20)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        worksheet.write_datetime_with_format(row_num, 0, row.date, &date_format)?;
        worksheet.write_string(row_num, 1, &row.employee_name)?;
        worksheet.write_datetime_with_format(row_num, 2, row.check_in, &datetime_format)?;
        match row.check_out {
            Some(check_out) => {
                worksheet.write_datetime_with_format(row_num, 3, check_out, &datetime_format)?
            }
            None => worksheet.write_string(row_num, 3, NOT_CHECKED_OUT)?,
        };
        worksheet.write_string(row_num, 4, row.hours_worked.to_string())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Exports `rows` to `EXPORT_FILE_NAME` inside `upload_dir`, creating the
/// directory if needed. The returned bytes are exactly what was written.
pub fn export_to_dir(rows: &[AttendanceRow], upload_dir: &Path) -> Result<Vec<u8>, ExportError> {
    let bytes = build_workbook(rows)?;

    fs::create_dir_all(upload_dir)?;
    let path = upload_dir.join(EXPORT_FILE_NAME);
    fs::write(&path, &bytes)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Attendance export written");
    Ok(bytes)
}
