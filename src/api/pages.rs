use crate::model::attendance::{AttendanceEntry, DISPLAY_FORMAT, NOT_CHECKED_OUT};
use crate::store::AttendanceService;
use crate::utils::html::escape;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use std::collections::BTreeMap;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
th { background: #f0f0f0; }
form label { display: block; margin-top: 0.6rem; }
"#;

fn page(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
             <body>\n{body}</body>\n</html>\n",
            title = escape(title),
        ))
}

/// Check-in / check-out entry form
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Entry form", body = String, content_type = "text/html")
    ),
    tag = "Pages"
)]
pub async fn index() -> impl Responder {
    let body = r#"<h1>Attendance</h1>
<form method="post" action="/record_action">
  <label>Employee name <input type="text" name="employee_name" required></label>
  <label>Date and time <input type="datetime-local" name="datetime" required></label>
  <label>Action
    <select name="action">
      <option value="check_in">Check in</option>
      <option value="check_out">Check out</option>
    </select>
  </label>
  <p><button type="submit">Record</button></p>
</form>
<p><a href="/attendance">View attendance</a> | <a href="/download_attendance">Download spreadsheet</a></p>
"#;
    page("Attendance", body)
}

/// Per-date attendance view with hours worked
#[utoipa::path(
    get,
    path = "/attendance",
    responses(
        (status = 200, description = "Attendance records grouped by date", body = String, content_type = "text/html")
    ),
    tag = "Pages"
)]
pub async fn view_attendance(service: web::Data<AttendanceService>) -> impl Responder {
    let records = service.snapshot();
    page("Attendance records", &render_records(&records))
}

fn render_records(records: &BTreeMap<NaiveDate, Vec<AttendanceEntry>>) -> String {
    let mut html = String::from("<h1>Attendance records</h1>\n");

    if records.is_empty() {
        html.push_str("<p>No attendance recorded yet.</p>\n");
    }

    for (date, entries) in records {
        html.push_str(&format!(
            "<h2>{date}</h2>\n<table>\n<tr><th>Employee Name</th><th>Check In</th>\
             <th>Check Out</th><th>Hours Worked</th></tr>\n"
        ));
        for entry in entries {
            let check_out = entry
                .check_out
                .map(|t| t.format(DISPLAY_FORMAT).to_string())
                .unwrap_or_else(|| NOT_CHECKED_OUT.to_string());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&entry.employee_name),
                entry.check_in.format(DISPLAY_FORMAT),
                check_out,
                entry.hours_worked(),
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("<p><a href=\"/\">Back</a> | <a href=\"/download_attendance\">Download spreadsheet</a></p>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::TIMESTAMP_FORMAT;
    use actix_web::test as atest;
    use actix_web::{App, body::to_bytes, http::StatusCode};
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_render_empty_ledger() {
        let html = render_records(&BTreeMap::new());
        assert!(html.contains("No attendance recorded yet."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_render_escapes_employee_names() {
        let service = AttendanceService::new(0);
        service.check_in("<script>", ts("2024-01-01T09:00"));
        let html = render_records(&service.snapshot());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[actix_web::test]
    async fn test_view_attendance_shows_hours() {
        let service = web::Data::new(AttendanceService::new(0));
        service.check_in("Alice", ts("2024-01-01T09:00"));
        service.check_out("Alice", ts("2024-01-01T17:30"));
        service.check_in("Bob", ts("2024-01-01T09:00"));

        let app = atest::init_service(
            App::new()
                .app_data(service.clone())
                .route("/attendance", web::get().to(view_attendance)),
        )
        .await;

        let resp = atest::call_service(&app, atest::TestRequest::get().uri("/attendance").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("<h2>2024-01-01</h2>"));
        assert!(html.contains("<td>Alice</td><td>2024-01-01 09:00:00</td><td>2024-01-01 17:30:00</td><td>8.50</td>"));
        assert!(html.contains("<td>Bob</td><td>2024-01-01 09:00:00</td><td>Not checked out</td><td>N/A</td>"));
    }

    #[actix_web::test]
    async fn test_index_renders_form() {
        let app = atest::init_service(App::new().route("/", web::get().to(index))).await;
        let resp = atest::call_service(&app, atest::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("action=\"/record_action\""));
        assert!(html.contains("name=\"datetime\""));
        assert!(html.contains("value=\"check_out\""));
    }
}
