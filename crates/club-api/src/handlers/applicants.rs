//! Applicant review handlers
//!
//! Accept and reject answer with the same redirect whether or not the target
//! was still an applicant, so repeated or racing submissions are harmless.

use axum::extract::{OriginalUri, Path, State};
use club_service::MembershipService;

use crate::extractors::{ClubPath, ClubUserPath, CurrentCaller};
use crate::response::{Found, OrRedirect, Page, PageResult};
use crate::routes::paths;
use crate::state::AppState;

/// GET /applicants/:club_name/
pub async fn list_applicants(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubPath>,
) -> PageResult<Page> {
    let page = MembershipService::new(state.service_context())
        .list_applicants(caller, &path.club_name)
        .await
        .or_redirect(uri.path())?;

    Ok(Page::render("applicants_list.html", &page)?)
}

/// GET|POST /applicants/:club_name/accept/:user_id/
pub async fn accept_applicant(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    let target = path.user_id()?;

    MembershipService::new(state.service_context())
        .accept_applicant(caller, &path.club_name, target)
        .await
        .or_redirect(uri.path())?;

    Ok(Found(paths::applicants(&path.club_name)))
}

/// GET|POST /applicants/:club_name/reject/:user_id/
pub async fn reject_applicant(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    let target = path.user_id()?;

    MembershipService::new(state.service_context())
        .reject_applicant(caller, &path.club_name, target)
        .await
        .or_redirect(uri.path())?;

    Ok(Found(paths::applicants(&path.club_name)))
}
