//! Access gate over the `/admin/*` pages.
//!
//! Presence check only: any request under the admin prefix (except the
//! login page) must carry *some* token, in the `adminToken` cookie or an
//! `Authorization: Bearer` header, or it is redirected to `/admin/login`.
//! The token's value is never verified, so this is not authentication;
//! it only keeps unauthenticated browsers off the admin screens.

use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::ADMIN_COOKIE;

const ADMIN_PREFIX: &str = "/admin";
const LOGIN_PATH: &str = "/admin/login";

/// Middleware applied to the whole router; non-admin paths pass straight
/// through, mirroring a path matcher scoped to the admin prefix.
pub async fn admin_gate(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if path.starts_with(ADMIN_PREFIX) && path != LOGIN_PATH && extract_token(req.headers()).is_none()
    {
        tracing::info!(path, "admin request without token, redirecting to login");
        return Redirect::temporary(LOGIN_PATH).into_response();
    }
    next.run(req).await
}

/// Pulls a token from the `adminToken` cookie or a Bearer header. Empty
/// values count as absent; any non-empty value passes the gate.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookie_header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == ADMIN_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn finds_token_in_cookie() {
        let headers = headers_with(header::COOKIE, "theme=light; adminToken=abc123");
        assert_eq!(extract_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn finds_token_in_bearer_header() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer xyz");
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn empty_or_missing_token_counts_as_absent() {
        assert!(extract_token(&HeaderMap::new()).is_none());
        let headers = headers_with(header::COOKIE, "adminToken=");
        assert!(extract_token(&headers).is_none());
        let headers = headers_with(header::AUTHORIZATION, "Bearer ");
        assert!(extract_token(&headers).is_none());
    }
}
