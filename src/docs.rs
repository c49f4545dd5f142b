use crate::api::attendance::{AttendanceDay, AttendanceEntryView};
use crate::models::RecordActionForm;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker",
        version = "0.1.0",
        description = r#"
## Attendance Tracker

Records employee check-in and check-out events in memory, grouped by the
calendar date of check-in, and reports hours worked per entry.

### Key Features
- **Entry form**: submit check-in / check-out events (`POST /record_action`)
- **Attendance view**: per-date tables with hours worked (`N/A` while open)
- **Export**: download every record as `attendance_records.xlsx`
- **JSON**: the same records for other tools (`GET /api/attendance`)

Records live for the lifetime of the process only.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::pages::index,
        crate::api::pages::view_attendance,

        crate::api::attendance::record_action,
        crate::api::attendance::list_attendance,

        crate::api::export::download_attendance
    ),
    components(
        schemas(
            RecordActionForm,
            AttendanceDay,
            AttendanceEntryView
        )
    ),
    tags(
        (name = "Pages", description = "HTML form and attendance view"),
        (name = "Attendance", description = "Attendance recording and export APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/attendance",
            "/record_action",
            "/api/attendance",
            "/download_attendance",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("RecordActionForm"));
        assert!(json.contains("application/x-www-form-urlencoded"));
    }
}
