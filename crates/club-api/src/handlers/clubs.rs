//! Club listing, creation, and self-service membership handlers

use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Response},
};
use club_service::dto::{validation_messages, CreateClubForm};
use club_service::{ClubService, MembershipService};
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::extractors::{ClubPath, CurrentCaller, HtmlForm};
use crate::response::{Found, OrRedirect, Page, PageResult, Rejection};
use crate::routes::paths;
use crate::state::AppState;

/// GET /clubs/
pub async fn list_clubs(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
) -> PageResult<Page> {
    let page = ClubService::new(state.service_context())
        .list(caller)
        .await
        .or_redirect(uri.path())?;

    let empty: [String; 0] = [];
    Ok(Page::render(
        "clubs.html",
        &json!({ "clubs": page.clubs, "errors": empty }),
    )?)
}

/// POST /clubs/
///
/// The new club's owner lands on its member management page.
pub async fn create_club(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    HtmlForm(form): HtmlForm<CreateClubForm>,
) -> PageResult<Response> {
    let service = ClubService::new(state.service_context());

    let errors = match form.validate() {
        Ok(()) => match service.create(caller, form).await {
            Ok(club) => return Ok(Found(paths::member_management(&club.name)).into_response()),
            Err(e) => match e.form_message() {
                Some(message) => {
                    debug!(error = %e, "Club creation rejected");
                    vec![message]
                }
                None => return Err(Rejection::from_service(e, uri.path())),
            },
        },
        Err(errors) => validation_messages(&errors),
    };

    let page = service.list(caller).await.or_redirect(uri.path())?;
    let rendered = Page::render(
        "clubs.html",
        &json!({ "clubs": page.clubs, "errors": errors }),
    )?;

    Ok(rendered.into_response())
}

/// POST /club/:club_name/apply/
pub async fn apply(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubPath>,
) -> PageResult<Found> {
    MembershipService::new(state.service_context())
        .apply(caller, &path.club_name)
        .await
        .or_redirect(uri.path())?;

    Ok(Found::to(paths::CLUBS))
}

/// POST /club/:club_name/leave/
pub async fn leave(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubPath>,
) -> PageResult<Found> {
    MembershipService::new(state.service_context())
        .leave(caller, &path.club_name)
        .await
        .or_redirect(uri.path())?;

    Ok(Found::to(paths::FEED))
}
