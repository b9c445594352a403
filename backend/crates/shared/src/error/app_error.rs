//! Application Error
//!
//! [`AppError`] is what leaves the service: a kind, a short detail for the
//! client and an optional next step. Domain errors (`AuthError`,
//! `WalletError`) turn into one at the HTTP boundary after logging their
//! own cause.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    detail: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

/// RFC 7807 problem body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    pub action: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            action: None,
        }
    }

    pub fn internal(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, detail)
    }

    /// What the client can do about it ("Log in again")
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.detail
    }

    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails {
            type_uri: format!("https://httpstatuses.io/{}", self.status_code()),
            title: self.kind.as_str(),
            status: self.status_code(),
            detail: self.detail.to_string(),
            action: self.action.as_ref().map(|a| a.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_body() {
        let problem = AppError::new(ErrorKind::Unauthorized, "Token expired")
            .with_action("Log in again")
            .problem();

        assert_eq!(problem.status, 401);
        assert_eq!(problem.title, "Unauthorized");
        assert_eq!(problem.type_uri, "https://httpstatuses.io/401");
        assert_eq!(problem.action.as_deref(), Some("Log in again"));

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "https://httpstatuses.io/401");
        assert_eq!(json["detail"], "Token expired");
    }

    #[test]
    fn test_action_is_null_when_absent() {
        let err = AppError::new(ErrorKind::NotFound, "Withdrawal request not found");
        let json = serde_json::to_value(err.problem()).unwrap();
        assert!(json["action"].is_null());
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_display_includes_status() {
        let err = AppError::new(ErrorKind::ServiceUnavailable, "Database unavailable");

        assert!(err.kind().is_server_error());
        assert_eq!(err.to_string(), "503 Service Unavailable: Database unavailable");
        assert_eq!(AppError::internal("Internal server error").status_code(), 500);
    }
}
