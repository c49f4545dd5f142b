use crate::error::AppError;
use crate::model::attendance::{AttendanceEntry, HoursWorked, TIMESTAMP_FORMAT};
use crate::models::{Action, RecordActionForm};
use crate::store::AttendanceService;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AttendanceEntryView {
    #[schema(example = "Alice")]
    pub employee_name: String,

    #[schema(example = "2024-01-01T09:00:00", value_type = String, format = DateTime)]
    pub check_in: NaiveDateTime,

    #[schema(example = "2024-01-01T17:30:00", value_type = Option<String>, format = DateTime)]
    pub check_out: Option<NaiveDateTime>,

    /// Two-decimal hours, or "N/A" while the entry is open
    #[schema(example = "8.50", value_type = String)]
    pub hours_worked: HoursWorked,
}

impl From<AttendanceEntry> for AttendanceEntryView {
    fn from(entry: AttendanceEntry) -> Self {
        let hours_worked = entry.hours_worked();
        Self {
            employee_name: entry.employee_name,
            check_in: entry.check_in,
            check_out: entry.check_out,
            hours_worked,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceDay {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntryView>,
}

/// Record a check-in or check-out
#[utoipa::path(
    post,
    path = "/record_action",
    request_body(
        content = RecordActionForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Recorded, or ignored when nothing matched; redirects to the entry form"),
        (status = 400, description = "Malformed datetime or missing form field", body = String, content_type = "text/plain"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "record_action",
    skip(service, form),
    fields(employee_name = %form.employee_name, action = %form.action)
)]
pub async fn record_action(
    service: web::Data<AttendanceService>,
    form: web::Form<RecordActionForm>,
) -> Result<HttpResponse, AppError> {
    let RecordActionForm {
        datetime,
        employee_name,
        action,
    } = form.into_inner();

    let at = NaiveDateTime::parse_from_str(&datetime, TIMESTAMP_FORMAT).map_err(|source| {
        AppError::InvalidTimestamp {
            input: datetime.clone(),
            source,
        }
    })?;

    match action.parse::<Action>() {
        Ok(Action::CheckIn) => {
            service.check_in(&employee_name, at);
            info!(%at, "Checked in");
        }
        Ok(Action::CheckOut) => {
            if service.check_out(&employee_name, at) {
                info!(%at, "Checked out");
            } else {
                debug!(%at, "No open check-in to close");
            }
        }
        Err(_) => warn!("Unknown action ignored"),
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// List all attendance records as JSON
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Attendance grouped by date, oldest first", body = [AttendanceDay])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(service: web::Data<AttendanceService>) -> impl Responder {
    let days: Vec<AttendanceDay> = service
        .snapshot()
        .into_iter()
        .map(|(date, entries)| AttendanceDay {
            date,
            entries: entries.into_iter().map(AttendanceEntryView::from).collect(),
        })
        .collect();

    HttpResponse::Ok().json(days)
}
