//! Error Kind
//!
//! The client-visible classes of failure. Each one owns a single HTTP
//! status, so domain crates never pick status codes themselves.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input or a violated business rule (minimum, balance)
    BadRequest,
    /// Missing, malformed or expired bearer token
    Unauthorized,
    /// Valid token, not an admin
    Forbidden,
    NotFound,
    /// Request no longer applies to the stored state
    Conflict,
    InternalServerError,
    /// Storage unreachable or exhausted
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// Reason phrase, used as the problem `title`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.parts().1
    }

    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    const fn parts(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_failures_map_to_client_errors() {
        for kind in [ErrorKind::BadRequest, ErrorKind::NotFound, ErrorKind::Conflict] {
            assert!(!kind.is_server_error(), "{kind}");
        }
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
    }

    #[test]
    fn test_storage_failures_are_server_errors() {
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Forbidden.to_string(), "403 Forbidden");
        assert_eq!(ErrorKind::Unauthorized.as_str(), "Unauthorized");
    }
}
