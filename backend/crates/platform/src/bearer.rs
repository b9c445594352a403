//! Bearer credential extraction
//!
//! Parses `Authorization: Bearer <token>` (RFC 6750). The scheme is matched
//! case-insensitively; anything else is treated as absent.

use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Token from the `Authorization` header, if present and well-formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
