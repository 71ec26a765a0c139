//! Session caller extractor
//!
//! Reads the `session` cookie and resolves it to a [`Caller`]. A missing,
//! malformed or expired cookie yields an anonymous caller, never a rejection.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use club_common::SessionToken;
use club_core::Caller;
use club_service::AuthService;

use crate::state::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// The caller behind the current request
#[derive(Debug, Clone, Copy)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let caller = AuthService::new(app_state.service_context())
            .caller_from_session(jar.get(SESSION_COOKIE).map(Cookie::value));

        Ok(CurrentCaller(caller))
    }
}

/// Add the session cookie for a freshly issued token
pub fn set_session_cookie(jar: CookieJar, session: &SessionToken, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    jar.add(cookie)
}

/// Remove the session cookie
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
