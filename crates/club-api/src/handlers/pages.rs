//! Home and feed pages

use axum::extract::{OriginalUri, State};
use club_service::UserService;
use serde_json::json;

use crate::extractors::CurrentCaller;
use crate::response::{ApiResult, OrRedirect, Page, PageResult};
use crate::state::AppState;

/// GET /
pub async fn home(CurrentCaller(caller): CurrentCaller) -> ApiResult<Page> {
    Page::render(
        "home.html",
        &json!({ "authenticated": caller.is_authenticated() }),
    )
}

/// GET /feed/
pub async fn feed(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
) -> PageResult<Page> {
    let page = UserService::new(state.service_context())
        .feed(caller)
        .await
        .or_redirect(uri.path())?;
    Ok(Page::render("feed.html", &page)?)
}
