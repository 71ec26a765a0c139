//! Page route integration tests
//!
//! Every test spawns its own server over a fresh in-memory store, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use club_core::UserId;
use integration_tests::{
    accept, applicants, assert_page, assert_redirect, assert_status, member_action,
    member_management, reject, Account, Beatles, TestServer, CLUB,
};
use reqwest::StatusCode;

async fn setup() -> (TestServer, Beatles) {
    let server = TestServer::start().await.expect("Failed to start server");
    let club = Beatles::create(&server).await.expect("Failed to create club");
    (server, club)
}

async fn applicant_count(account: &Account) -> usize {
    let response = account.browser.get(&applicants()).await.unwrap();
    let page = assert_page(response, "applicants_list.html").await.unwrap();
    page.context["applicants"].as_array().unwrap().len()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = browser.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.browser().unwrap().get("/").await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_sign_up_logs_in() {
    let server = TestServer::start().await.expect("Failed to start server");
    let account = Account::sign_up(&server, "john").await.unwrap();

    let response = account.browser.get("/feed/").await.unwrap();
    let page = assert_page(response, "feed.html").await.unwrap();
    assert_eq!(page.context["user"]["username"], "john");
}

#[tokio::test]
async fn test_sign_up_invalid_form_rerenders() {
    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let mut form = integration_tests::sign_up_form("john");
    form.password_confirmation = "Different123".to_string();
    let response = browser.post_form("/sign_up/", &form.as_pairs()).await.unwrap();
    let page = assert_page(response, "sign_up.html").await.unwrap();

    assert!(!page.context["errors"].as_array().unwrap().is_empty());
    assert!(page.context["form"].get("new_password").is_none());

    // No session was issued
    let response = browser.get("/feed/").await.unwrap();
    assert_redirect(response, "/log_in/?next=/feed/").await.unwrap();
}

#[tokio::test]
async fn test_sign_up_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    Account::sign_up(&server, "john").await.unwrap();

    let browser = server.browser().unwrap();
    let form = integration_tests::sign_up_form("john");
    let response = browser.post_form("/sign_up/", &form.as_pairs()).await.unwrap();
    let page = assert_page(response, "sign_up.html").await.unwrap();

    assert_eq!(page.context["errors"][0], "Username already in use");
}

#[tokio::test]
async fn test_log_in_redirects_to_next() {
    let server = TestServer::start().await.expect("Failed to start server");
    let account = Account::sign_up(&server, "john").await.unwrap();

    let response = account.browser.get("/log_out/").await.unwrap();
    assert_redirect(response, "/").await.unwrap();

    let response = account.browser.get("/profile/").await.unwrap();
    assert_redirect(response, "/log_in/?next=/profile/").await.unwrap();

    let response = account
        .browser
        .post_form(
            "/log_in/",
            &[
                ("username", "john"),
                ("password", integration_tests::PASSWORD),
                ("next", "/clubs/"),
            ],
        )
        .await
        .unwrap();
    assert_redirect(response, "/clubs/").await.unwrap();

    let response = account.browser.get("/profile/").await.unwrap();
    assert_page(response, "profile.html").await.unwrap();
}

#[tokio::test]
async fn test_log_in_default_redirect_and_offsite_next() {
    let server = TestServer::start().await.expect("Failed to start server");
    Account::sign_up(&server, "john").await.unwrap();

    let browser = server.browser().unwrap();
    let response = browser.log_in("john").await.unwrap();
    assert_redirect(response, "/profile/").await.unwrap();

    let browser = server.browser().unwrap();
    let response = browser
        .post_form(
            "/log_in/",
            &[
                ("username", "john"),
                ("password", integration_tests::PASSWORD),
                ("next", "//evil.example.org/"),
            ],
        )
        .await
        .unwrap();
    assert_redirect(response, "/profile/").await.unwrap();
}

#[tokio::test]
async fn test_log_in_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    Account::sign_up(&server, "john").await.unwrap();

    let browser = server.browser().unwrap();
    let response = browser
        .post_form(
            "/log_in/",
            &[("username", "john"), ("password", "WrongPassword1")],
        )
        .await
        .unwrap();
    assert!(response.headers().get("set-cookie").is_none());

    let page = assert_page(response, "log_in.html").await.unwrap();
    assert_eq!(
        page.context["errors"][0],
        "The credentials provided were invalid!"
    );
}

#[tokio::test]
async fn test_authenticated_user_skips_log_in_and_sign_up() {
    let server = TestServer::start().await.expect("Failed to start server");
    let account = Account::sign_up(&server, "john").await.unwrap();

    let response = account.browser.get("/log_in/").await.unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    let response = account.browser.get("/sign_up/").await.unwrap();
    assert_redirect(response, "/feed/").await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    let server = TestServer::start().await.expect("Failed to start server");
    let account = Account::sign_up(&server, "john").await.unwrap();

    let response = account
        .browser
        .post_form(
            "/profile/",
            &[
                ("first_name", "John"),
                ("last_name", "Lennon"),
                ("bio", "Imagine"),
                ("chess_experience_level", "4"),
            ],
        )
        .await
        .unwrap();
    assert_redirect(response, "/profile/").await.unwrap();

    let response = account.browser.get("/profile/").await.unwrap();
    let page = assert_page(response, "profile.html").await.unwrap();
    let user = &page.context["profile"]["user"];
    assert_eq!(user["full_name"], "John Lennon");
    assert_eq!(user["chess_experience_level"], 4);

    let response = account
        .browser
        .post_form(
            "/profile/",
            &[
                ("first_name", ""),
                ("last_name", "Lennon"),
                ("chess_experience_level", "9"),
            ],
        )
        .await
        .unwrap();
    let page = assert_page(response, "profile.html").await.unwrap();
    assert_eq!(page.context["errors"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Applicant Tests
// ============================================================================

#[tokio::test]
async fn test_anonymous_redirected_to_log_in() {
    let (server, _club) = setup().await;
    let browser = server.browser().unwrap();

    let response = browser.get("/applicants/Beatles/").await.unwrap();
    assert_redirect(response, "/log_in/?next=/applicants/Beatles/")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_officer_accepts_applicant() {
    let (_server, club) = setup().await;
    assert_eq!(applicant_count(&club.officer).await, 1);

    let response = club
        .officer
        .browser
        .post(&accept(club.applicant.id))
        .await
        .unwrap();
    assert_redirect(response, &applicants()).await.unwrap();
    assert_eq!(applicant_count(&club.officer).await, 0);

    // The new member now sees the club on their feed
    let response = club.applicant.browser.get("/feed/").await.unwrap();
    let page = assert_page(response, "feed.html").await.unwrap();
    assert_eq!(page.context["clubs"][0]["club"]["name"], CLUB);
    assert_eq!(page.context["clubs"][0]["role"], "MEM");
}

#[tokio::test]
async fn test_officer_rejects_applicant() {
    let (_server, club) = setup().await;

    let response = club
        .officer
        .browser
        .get(&reject(club.applicant.id))
        .await
        .unwrap();
    assert_redirect(response, &applicants()).await.unwrap();
    assert_eq!(applicant_count(&club.officer).await, 0);

    // The row is gone, so applying again works
    let response = club
        .applicant
        .browser
        .post(&format!("/club/{CLUB}/apply/"))
        .await
        .unwrap();
    assert_redirect(response, "/clubs/").await.unwrap();
    assert_eq!(applicant_count(&club.officer).await, 1);
}

#[tokio::test]
async fn test_member_cannot_review_applicants() {
    let (_server, club) = setup().await;

    let response = club.member.browser.get(&applicants()).await.unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    let response = club
        .member
        .browser
        .get(&accept(club.applicant.id))
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    let response = club
        .member
        .browser
        .get(&reject(club.applicant.id))
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    assert_eq!(applicant_count(&club.owner).await, 1);
}

#[tokio::test]
async fn test_double_accept_is_harmless() {
    let (_server, club) = setup().await;

    for _ in 0..2 {
        let response = club
            .owner
            .browser
            .get(&accept(club.applicant.id))
            .await
            .unwrap();
        assert_redirect(response, &applicants()).await.unwrap();
    }

    let response = club.owner.browser.get(&member_management()).await.unwrap();
    let page = assert_page(response, "member_management.html").await.unwrap();
    assert_eq!(page.context["members"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_accept_unknown_user_is_noop() {
    let (_server, club) = setup().await;

    let response = club
        .owner
        .browser
        .get(&accept(UserId::new(9999)))
        .await
        .unwrap();
    assert_redirect(response, &applicants()).await.unwrap();
    assert_eq!(applicant_count(&club.owner).await, 1);

    // A member is not an applicant, so accepting them changes nothing
    let response = club.owner.browser.get(&accept(club.member.id)).await.unwrap();
    assert_redirect(response, &applicants()).await.unwrap();
    assert_eq!(applicant_count(&club.owner).await, 1);
}

#[tokio::test]
async fn test_malformed_user_id() {
    let (_server, club) = setup().await;

    let response = club
        .owner
        .browser
        .get("/applicants/Beatles/accept/abc/")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unknown_club_redirects_to_feed() {
    let (_server, club) = setup().await;

    let response = club
        .owner
        .browser
        .get("/applicants/Wings/")
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();
}

// ============================================================================
// Member Management Tests
// ============================================================================

#[tokio::test]
async fn test_member_management_lists() {
    let (_server, club) = setup().await;

    let response = club.officer.browser.get(&member_management()).await.unwrap();
    let page = assert_page(response, "member_management.html").await.unwrap();

    assert_eq!(page.context["members"].as_array().unwrap().len(), 3);
    assert_eq!(page.context["banned"].as_array().unwrap().len(), 1);
    assert_eq!(page.context["member_is_empty"], false);
    assert_eq!(page.context["banned_is_empty"], false);
    assert_eq!(page.context["viewer_role"], "OFF");
}

#[tokio::test]
async fn test_banned_and_applicant_denied_management() {
    let (_server, club) = setup().await;

    for account in [&club.banned, &club.applicant, &club.member] {
        let response = account.browser.get(&member_management()).await.unwrap();
        assert_redirect(response, "/feed/").await.unwrap();
    }
}

#[tokio::test]
async fn test_officer_cannot_promote() {
    let (_server, club) = setup().await;

    let response = club
        .officer
        .browser
        .post(&member_action("promote", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();
}

#[tokio::test]
async fn test_promote_and_demote() {
    let (_server, club) = setup().await;

    let response = club
        .owner
        .browser
        .post(&member_action("promote", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    // Ringo is an officer now and may review applicants
    assert_eq!(applicant_count(&club.member).await, 1);

    let response = club
        .owner
        .browser
        .post(&member_action("demote", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    let response = club.member.browser.get(&applicants()).await.unwrap();
    assert_redirect(response, "/feed/").await.unwrap();
}

#[tokio::test]
async fn test_transfer_ownership() {
    let (_server, club) = setup().await;

    let response = club
        .owner
        .browser
        .post(&member_action("transfer", club.officer.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    // John is an officer now and can no longer promote
    let response = club
        .owner
        .browser
        .post(&member_action("promote", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    let response = club.officer.browser.get(&member_management()).await.unwrap();
    let page = assert_page(response, "member_management.html").await.unwrap();
    assert_eq!(page.context["viewer_role"], "OWN");
}

#[tokio::test]
async fn test_ban_and_unban() {
    let (_server, club) = setup().await;

    let response = club
        .officer
        .browser
        .post(&member_action("ban", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    let response = club.member.browser.get("/feed/").await.unwrap();
    let page = assert_page(response, "feed.html").await.unwrap();
    assert_eq!(page.context["clubs"][0]["role"], "BAN");

    let response = club
        .officer
        .browser
        .post(&member_action("unban", club.member.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    let response = club.member.browser.get("/feed/").await.unwrap();
    let page = assert_page(response, "feed.html").await.unwrap();
    assert!(page.context["clubs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_officer_cannot_ban_owner() {
    let (_server, club) = setup().await;

    let response = club
        .officer
        .browser
        .post(&member_action("ban", club.owner.id))
        .await
        .unwrap();
    assert_redirect(response, &member_management()).await.unwrap();

    let response = club.owner.browser.get(&member_management()).await.unwrap();
    let page = assert_page(response, "member_management.html").await.unwrap();
    assert_eq!(page.context["viewer_role"], "OWN");
    assert_eq!(page.context["banned"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_banned_user_cannot_reapply() {
    let (_server, club) = setup().await;

    let response = club
        .banned
        .browser
        .post(&format!("/club/{CLUB}/apply/"))
        .await
        .unwrap();
    assert_redirect(response, "/clubs/").await.unwrap();
    assert_eq!(applicant_count(&club.owner).await, 1);
}

// ============================================================================
// Club Tests
// ============================================================================

#[tokio::test]
async fn test_club_listing_shows_tags() {
    let (_server, club) = setup().await;

    let response = club.applicant.browser.get("/clubs/").await.unwrap();
    let page = assert_page(response, "clubs.html").await.unwrap();
    assert_eq!(page.context["clubs"][0]["club"]["name"], CLUB);
    assert_eq!(page.context["clubs"][0]["role"], "APP");
}

#[tokio::test]
async fn test_duplicate_club_name_rerenders() {
    let (_server, club) = setup().await;

    let response = club
        .member
        .browser
        .post_form("/clubs/", &[("name", CLUB)])
        .await
        .unwrap();
    let page = assert_page(response, "clubs.html").await.unwrap();
    assert_eq!(page.context["errors"][0], "Club name already in use");
}

#[tokio::test]
async fn test_leave_club() {
    let (_server, club) = setup().await;

    let response = club
        .member
        .browser
        .post(&format!("/club/{CLUB}/leave/"))
        .await
        .unwrap();
    assert_redirect(response, "/feed/").await.unwrap();

    let response = club
        .owner
        .browser
        .post(&format!("/club/{CLUB}/leave/"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}
