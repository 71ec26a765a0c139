//! Member management handlers
//!
//! Every transition redirects back to the management page, applied or not.

use axum::extract::{OriginalUri, Path, State};
use club_core::UserId;
use club_service::{MembershipService, ServiceResult, TransitionOutcome};

use crate::extractors::{ClubPath, ClubUserPath, CurrentCaller};
use crate::response::{Found, OrRedirect, Page, PageResult};
use crate::routes::paths;
use crate::state::AppState;

/// GET /club/:club_name/member_management/
pub async fn member_management(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubPath>,
) -> PageResult<Page> {
    let page = MembershipService::new(state.service_context())
        .list_members_and_banned(caller, &path.club_name)
        .await
        .or_redirect(uri.path())?;

    Ok(Page::render("member_management.html", &page)?)
}

#[derive(Debug, Clone, Copy)]
enum MemberAction {
    Promote,
    Demote,
    Transfer,
    Ban,
    Unban,
}

async fn manage(
    state: &AppState,
    caller: CurrentCaller,
    original_path: &str,
    path: ClubUserPath,
    action: MemberAction,
) -> PageResult<Found> {
    let target = path.user_id()?;
    let club_name = path.club_name.as_str();

    run(state, caller, club_name, target, action)
        .await
        .or_redirect(original_path)?;

    Ok(Found(paths::member_management(club_name)))
}

async fn run(
    state: &AppState,
    CurrentCaller(caller): CurrentCaller,
    club_name: &str,
    target: UserId,
    action: MemberAction,
) -> ServiceResult<TransitionOutcome> {
    let service = MembershipService::new(state.service_context());
    match action {
        MemberAction::Promote => service.promote(caller, club_name, target).await,
        MemberAction::Demote => service.demote(caller, club_name, target).await,
        MemberAction::Transfer => service.transfer_ownership(caller, club_name, target).await,
        MemberAction::Ban => service.ban(caller, club_name, target).await,
        MemberAction::Unban => service.unban(caller, club_name, target).await,
    }
}

/// POST /club/:club_name/member_management/promote/:user_id/
pub async fn promote(
    State(state): State<AppState>,
    caller: CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    manage(&state, caller, uri.path(), path, MemberAction::Promote).await
}

/// POST /club/:club_name/member_management/demote/:user_id/
pub async fn demote(
    State(state): State<AppState>,
    caller: CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    manage(&state, caller, uri.path(), path, MemberAction::Demote).await
}

/// POST /club/:club_name/member_management/transfer/:user_id/
pub async fn transfer(
    State(state): State<AppState>,
    caller: CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    manage(&state, caller, uri.path(), path, MemberAction::Transfer).await
}

/// POST /club/:club_name/member_management/ban/:user_id/
pub async fn ban(
    State(state): State<AppState>,
    caller: CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    manage(&state, caller, uri.path(), path, MemberAction::Ban).await
}

/// POST /club/:club_name/member_management/unban/:user_id/
pub async fn unban(
    State(state): State<AppState>,
    caller: CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<ClubUserPath>,
) -> PageResult<Found> {
    manage(&state, caller, uri.path(), path, MemberAction::Unban).await
}
