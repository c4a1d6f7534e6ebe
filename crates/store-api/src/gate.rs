//! # Auth Gate
//!
//! Coarse, stateless request-time check evaluated before route handling.
//! Presence-only: the cookie's value is never validated here — token
//! authenticity and expiry belong to downstream services. The gate answers
//! with redirects, never error pages.

use axum::{
    extract::Request,
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Path prefix for authenticated user pages.
const USER_PREFIX: &str = "/user";

/// Path prefix for sign-in/sign-up pages.
const AUTH_PREFIX: &str = "/auth";

/// The cart is browsable without signing in.
const CART_PATH: &str = "/user/cart";

const SIGNIN_PATH: &str = "/auth/signin";
const PROFILE_PATH: &str = "/user/profile";

/// Middleware enforcing the gate rules, in order:
///
/// 1. The cart path always passes, cookie or not.
/// 2. Other `/user` paths without the cookie redirect to sign-in.
/// 3. `/auth` paths with the cookie redirect to the profile page
///    (no re-authentication UI for signed-in sessions).
/// 4. Everything else passes through unmodified.
pub async fn auth_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let signed_in = has_auth_cookie(request.headers());

    if under_prefix(path, USER_PREFIX) && path != CART_PATH && !signed_in {
        return Redirect::to(SIGNIN_PATH).into_response();
    }

    if under_prefix(path, AUTH_PREFIX) && signed_in {
        return Redirect::to(PROFILE_PATH).into_response();
    }

    next.run(request).await
}

/// Segment-bounded prefix match: `/user` and `/user/...` are gated,
/// sibling paths like `/username` are not.
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Presence check for the auth cookie. An empty value counts as absent.
fn has_auth_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == AUTH_COOKIE && !value.is_empty())
}
