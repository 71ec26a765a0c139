//! Route definitions
//!
//! Page routes keep the trailing-slash paths the site has always used.

pub mod paths;

use axum::{routing::get, routing::post, Router};

use crate::handlers::{applicants, auth, clubs, health, members, pages, users};
use crate::state::AppState;

/// Create the main router with all page routes (excluding health)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(page_routes())
        .merge(club_routes())
        .merge(applicant_routes())
        .merge(member_management_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Log-in, log-out and sign-up
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/log_in/", get(auth::log_in_page).post(auth::log_in))
        .route("/log_out/", get(auth::log_out))
        .route("/sign_up/", get(auth::sign_up_page).post(auth::sign_up))
}

/// Home, feed and profile
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/feed/", get(pages::feed))
        .route("/profile/", get(users::profile).post(users::update_profile))
}

/// Club listing, creation and self-service membership
fn club_routes() -> Router<AppState> {
    Router::new()
        .route("/clubs/", get(clubs::list_clubs).post(clubs::create_club))
        .route("/club/:club_name/apply/", post(clubs::apply))
        .route("/club/:club_name/leave/", post(clubs::leave))
}

/// Applicant review
fn applicant_routes() -> Router<AppState> {
    Router::new()
        .route("/applicants/:club_name/", get(applicants::list_applicants))
        .route(
            "/applicants/:club_name/accept/:user_id/",
            get(applicants::accept_applicant).post(applicants::accept_applicant),
        )
        .route(
            "/applicants/:club_name/reject/:user_id/",
            get(applicants::reject_applicant).post(applicants::reject_applicant),
        )
}

/// Member management
fn member_management_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/club/:club_name/member_management/",
            get(members::member_management),
        )
        .route(
            "/club/:club_name/member_management/promote/:user_id/",
            post(members::promote),
        )
        .route(
            "/club/:club_name/member_management/demote/:user_id/",
            post(members::demote),
        )
        .route(
            "/club/:club_name/member_management/transfer/:user_id/",
            post(members::transfer),
        )
        .route(
            "/club/:club_name/member_management/ban/:user_id/",
            post(members::ban),
        )
        .route(
            "/club/:club_name/member_management/unban/:user_id/",
            post(members::unban),
        )
}
