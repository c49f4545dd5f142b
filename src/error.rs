//! Error types surfaced by the HTTP handlers.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error)]
pub enum AppError {
    /// The `datetime` form field did not match `%Y-%m-%dT%H:%M`.
    #[display(fmt = "invalid datetime '{}': {}", input, source)]
    InvalidTimestamp {
        input: String,
        source: chrono::ParseError,
    },

    /// Writing or reading back the spreadsheet export failed.
    #[display(fmt = "An error occurred: {}", _0)]
    Export(ExportError),
}

#[derive(Debug, Display, Error, From)]
pub enum ExportError {
    #[display(fmt = "{}", _0)]
    Io(std::io::Error),

    #[display(fmt = "{}", _0)]
    Xlsx(rust_xlsxwriter::XlsxError),

    #[display(fmt = "{}", _0)]
    Worker(BlockingError),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidTimestamp { .. } => StatusCode::BAD_REQUEST,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use chrono::NaiveDateTime;
    use std::error::Error as _;

    fn parse_error() -> chrono::ParseError {
        NaiveDateTime::parse_from_str("yesterday", "%Y-%m-%dT%H:%M").unwrap_err()
    }

    #[test]
    fn test_invalid_timestamp_is_bad_request() {
        let err = AppError::InvalidTimestamp {
            input: "yesterday".to_string(),
            source: parse_error(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("invalid datetime 'yesterday'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_export_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: AppError = ExportError::from(io_err).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "An error occurred: access denied");
    }

    #[actix_web::test]
    async fn test_error_response_is_plain_text() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::from(ExportError::from(io_err));
        let resp = err.error_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = resp.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, "An error occurred: file not found");
    }
}
