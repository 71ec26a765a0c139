//! Log-in, log-out and sign-up handlers
//!
//! Log-in and sign-up are only for anonymous callers; an authenticated
//! caller is sent to the feed instead.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use club_common::AppError;
use club_service::dto::{validation_messages, LogInForm, SignUpForm};
use club_service::{login_redirect_target, AuthService, ServiceError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::extractors::{clear_session_cookie, set_session_cookie, CurrentCaller, HtmlForm};
use crate::response::{ApiError, ApiResult, Found, Page};
use crate::routes::paths;
use crate::state::AppState;

/// Flash message shown when log-in fails
pub const INVALID_CREDENTIALS_MESSAGE: &str = "The credentials provided were invalid!";

/// `?next=` on the log-in page
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// ============================================================================
// Log in
// ============================================================================

/// GET /log_in/
pub async fn log_in_page(
    CurrentCaller(caller): CurrentCaller,
    Query(query): Query<NextQuery>,
) -> ApiResult<Response> {
    if caller.is_authenticated() {
        return Ok(Found::to(paths::FEED).into_response());
    }

    Ok(render_log_in(query.next.as_deref(), "", &[])?.into_response())
}

/// POST /log_in/
pub async fn log_in(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    jar: CookieJar,
    HtmlForm(form): HtmlForm<LogInForm>,
) -> ApiResult<Response> {
    if caller.is_authenticated() {
        return Ok(Found::to(paths::FEED).into_response());
    }

    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors);
        return Ok(render_log_in(form.next.as_deref(), &form.username, &messages)?.into_response());
    }

    match AuthService::new(state.service_context()).log_in(&form).await {
        Ok(signed_in) => {
            let jar = set_session_cookie(jar, &signed_in.session, state.secure_cookies());
            let target = login_redirect_target(form.next.as_deref());
            Ok((jar, Found(target)).into_response())
        }
        Err(ServiceError::App(AppError::InvalidCredentials)) => {
            let messages = [INVALID_CREDENTIALS_MESSAGE.to_string()];
            Ok(render_log_in(form.next.as_deref(), &form.username, &messages)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_log_in(next: Option<&str>, username: &str, errors: &[String]) -> ApiResult<Page> {
    Page::render(
        "log_in.html",
        &json!({
            "next": next,
            "username": username,
            "errors": errors,
        }),
    )
}

// ============================================================================
// Log out
// ============================================================================

/// GET /log_out/
pub async fn log_out(jar: CookieJar) -> impl IntoResponse {
    (clear_session_cookie(jar), Found::to(paths::HOME))
}

// ============================================================================
// Sign up
// ============================================================================

/// GET /sign_up/
pub async fn sign_up_page(CurrentCaller(caller): CurrentCaller) -> ApiResult<Response> {
    if caller.is_authenticated() {
        return Ok(Found::to(paths::FEED).into_response());
    }

    Ok(render_sign_up(None, &[])?.into_response())
}

/// POST /sign_up/
pub async fn sign_up(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    jar: CookieJar,
    HtmlForm(form): HtmlForm<SignUpForm>,
) -> ApiResult<Response> {
    if caller.is_authenticated() {
        return Ok(Found::to(paths::FEED).into_response());
    }

    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors);
        return Ok(render_sign_up(Some(&form), &messages)?.into_response());
    }

    let echo = form.clone();
    match AuthService::new(state.service_context()).sign_up(form).await {
        Ok(signed_in) => {
            let jar = set_session_cookie(jar, &signed_in.session, state.secure_cookies());
            Ok((jar, Found::to(paths::HOME)).into_response())
        }
        Err(e) => match e.form_message() {
            Some(message) => {
                debug!(error = %e, "Sign-up rejected");
                Ok(render_sign_up(Some(&echo), &[message])?.into_response())
            }
            None => Err(ApiError::from(e)),
        },
    }
}

/// Re-renders never echo the password fields
fn render_sign_up(form: Option<&SignUpForm>, errors: &[String]) -> ApiResult<Page> {
    let values = form.map(|form| {
        json!({
            "first_name": form.first_name,
            "last_name": form.last_name,
            "username": form.username,
            "email": form.email,
            "bio": form.bio,
            "chess_experience_level": form.chess_experience_level,
        })
    });

    Page::render("sign_up.html", &json!({ "form": values, "errors": errors }))
}
