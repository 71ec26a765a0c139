//! Profile handlers

use axum::{
    extract::{OriginalUri, State},
    response::{IntoResponse, Response},
};
use club_service::dto::{validation_messages, ProfileForm};
use club_service::UserService;
use serde_json::json;
use validator::Validate;

use crate::extractors::{CurrentCaller, HtmlForm};
use crate::response::{Found, OrRedirect, Page, PageResult, Rejection};
use crate::routes::paths;
use crate::state::AppState;

/// GET /profile/
pub async fn profile(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
) -> PageResult<Page> {
    let page = UserService::new(state.service_context())
        .profile(caller)
        .await
        .or_redirect(uri.path())?;

    let empty: [String; 0] = [];
    Ok(Page::render(
        "profile.html",
        &json!({ "profile": page, "errors": empty }),
    )?)
}

/// POST /profile/
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    HtmlForm(form): HtmlForm<ProfileForm>,
) -> PageResult<Response> {
    let service = UserService::new(state.service_context());

    let errors = match form.validate() {
        Ok(()) => match service.update_profile(caller, form).await {
            Ok(_) => return Ok(Found::to(paths::PROFILE).into_response()),
            Err(e) => match e.form_message() {
                Some(message) => vec![message],
                None => return Err(Rejection::from_service(e, uri.path())),
            },
        },
        Err(errors) => validation_messages(&errors),
    };

    let page = service.profile(caller).await.or_redirect(uri.path())?;
    let rendered = Page::render(
        "profile.html",
        &json!({ "profile": page, "errors": errors }),
    )
    .map_err(Rejection::from)?;

    Ok(rendered.into_response())
}
