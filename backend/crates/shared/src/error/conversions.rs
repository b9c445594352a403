//! Storage failures classified into [`AppError`] and, with the `axum`
//! feature, `AppError` rendered as an HTTP response.

use super::app_error::AppError;
#[cfg(any(feature = "sqlx", test))]
use super::kind::ErrorKind;

/// Postgres SQLSTATE to error class.
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(any(feature = "sqlx", test))]
fn sqlstate_kind(code: &str) -> (ErrorKind, &'static str) {
    match code {
        "23505" => (ErrorKind::Conflict, "Duplicate key value"),
        // e.g. a balance that would go negative
        "23514" => (ErrorKind::BadRequest, "Check constraint violation"),
        "23503" => (ErrorKind::NotFound, "Referenced record not found"),
        c if c.starts_with("53") || c.starts_with("57P") || c.starts_with("08") => {
            (ErrorKind::ServiceUnavailable, "Database unavailable")
        }
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

/// Storage failures are never retried; they surface immediately.
/// Takes a reference; the domain error keeps the original for its log.
#[cfg(feature = "sqlx")]
impl From<&sqlx::Error> for AppError {
    fn from(err: &sqlx::Error) -> Self {
        let (kind, detail) = match err {
            sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            sqlx::Error::Database(db) => match db.code() {
                Some(code) => sqlstate_kind(&code),
                None => (ErrorKind::InternalServerError, "Database error"),
            },
            _ => (ErrorKind::InternalServerError, "Database error"),
        };
        AppError::new(kind, detail)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self.problem()),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlstate_classes() {
        assert_eq!(sqlstate_kind("23505").0, ErrorKind::Conflict);
        assert_eq!(sqlstate_kind("23514").0, ErrorKind::BadRequest);
        assert_eq!(sqlstate_kind("57P01").0, ErrorKind::ServiceUnavailable);
        assert_eq!(sqlstate_kind("08006").0, ErrorKind::ServiceUnavailable);
        assert_eq!(sqlstate_kind("42P01").0, ErrorKind::InternalServerError);
    }
}
