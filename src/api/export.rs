use crate::config::Config;
use crate::error::{AppError, ExportError};
use crate::store::AttendanceService;
use crate::utils::spreadsheet::{EXPORT_FILE_NAME, XLSX_CONTENT_TYPE, export_to_dir};
use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, web};
use tracing::{error, instrument};

/// Download all attendance records as an Excel workbook
#[utoipa::path(
    get,
    path = "/download_attendance",
    responses(
        (status = 200, description = "attendance_records.xlsx as an attachment", body = Vec<u8>,
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 500, description = "Export failed", body = String, content_type = "text/plain",
            example = json!("An error occurred: Permission denied (os error 13)"))
    ),
    tag = "Attendance"
)]
#[instrument(name = "download_attendance", skip_all)]
pub async fn download_attendance(
    service: web::Data<AttendanceService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    // Snapshot under the read lock, then do file I/O off the async workers.
    let rows = service.rows();
    let upload_dir = config.upload_dir.clone();

    let bytes = web::block(move || export_to_dir(&rows, &upload_dir))
        .await
        .map_err(ExportError::from)
        .and_then(|written| written)
        .map_err(|e| {
            error!(error = %e, "Attendance export failed");
            AppError::from(e)
        })?;

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(EXPORT_FILE_NAME))
        .body(bytes))
}
