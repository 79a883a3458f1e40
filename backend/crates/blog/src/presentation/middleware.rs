//! Auth Middleware
//!
//! Bearer-token authentication for protected routes. The header must be
//! exactly `Authorization: Bearer <token>`; anything else (missing header,
//! wrong scheme, extra segments) is rejected before the token is even
//! verified.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::id::{Id, UserId};
use platform::token::TokenService;

use crate::error::BlogError;

/// Authenticated identity stored in request extensions after the bearer
/// token has been verified.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match header_value.and_then(parse_bearer) {
        Some(token) => token.to_owned(),
        None => return Err(BlogError::MissingToken.into_response()),
    };

    let claims = match tokens.verify(&token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => return Err(BlogError::from(e).into_response()),
    };

    req.extensions_mut().insert(Principal {
        user_id: Id::from_uuid(claims.user_id()),
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Parse `Bearer <token>` strictly: exactly two space-separated parts with
/// the literal `Bearer` scheme.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if scheme != "Bearer" || token.is_empty() || parts.next().is_some() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_accepts_well_formed() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_parse_bearer_rejects_wrong_scheme() {
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("bearer abc"), None);
    }

    #[test]
    fn test_parse_bearer_rejects_wrong_shape() {
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer a b"), None);
        assert_eq!(parse_bearer("Bearer  double-space"), None);
        assert_eq!(parse_bearer(""), None);
    }
}
