//! Test fixtures and data generators
//!
//! Provides reusable accounts and a populated club built over HTTP.

use anyhow::Result;
use club_core::UserId;

use crate::helpers::{assert_redirect, Browser, TestServer};

/// Password used by every fixture account
pub const PASSWORD: &str = "Password123";

/// Club used by the role scenarios
pub const CLUB: &str = "Beatles";

/// Sign-up form fields
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub new_password: String,
    pub password_confirmation: String,
    pub chess_experience_level: String,
}

impl SignUpRequest {
    pub fn as_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("bio", self.bio.as_str()),
            ("new_password", self.new_password.as_str()),
            ("password_confirmation", self.password_confirmation.as_str()),
            ("chess_experience_level", self.chess_experience_level.as_str()),
        ]
    }
}

/// A valid sign-up form for `username`
pub fn sign_up_form(username: &str) -> SignUpRequest {
    SignUpRequest {
        first_name: "Test".to_string(),
        last_name: username.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.org"),
        bio: String::new(),
        new_password: PASSWORD.to_string(),
        password_confirmation: PASSWORD.to_string(),
        chess_experience_level: "1".to_string(),
    }
}

/// A signed-in visitor and the id of their account
pub struct Account {
    pub browser: Browser,
    pub id: UserId,
}

impl Account {
    pub async fn sign_up(server: &TestServer, username: &str) -> Result<Self> {
        let browser = server.browser()?;
        let id = browser.sign_up(username).await?;
        Ok(Self { browser, id })
    }
}

/// "Beatles" with one user per tag
///
/// john owns it, paul is an officer, ringo a member, george an applicant
/// and pete banned.
pub struct Beatles {
    pub owner: Account,
    pub officer: Account,
    pub member: Account,
    pub applicant: Account,
    pub banned: Account,
}

impl Beatles {
    pub async fn create(server: &TestServer) -> Result<Self> {
        let owner = Account::sign_up(server, "john").await?;
        let response = owner
            .browser
            .post_form(
                "/clubs/",
                &[
                    ("name", CLUB),
                    ("location", "Liverpool"),
                    ("description", "Chess at the Cavern"),
                ],
            )
            .await?;
        assert_redirect(response, &member_management()).await?;

        let officer = Account::sign_up(server, "paul").await?;
        let member = Account::sign_up(server, "ringo").await?;
        let applicant = Account::sign_up(server, "george").await?;
        let banned = Account::sign_up(server, "pete").await?;

        for account in [&officer, &member, &applicant, &banned] {
            let response = account.browser.post(&format!("/club/{CLUB}/apply/")).await?;
            assert_redirect(response, "/clubs/").await?;
        }

        for account in [&officer, &member, &banned] {
            let response = owner.browser.get(&accept(account.id)).await?;
            assert_redirect(response, &applicants()).await?;
        }

        let response = owner
            .browser
            .post(&member_action("promote", officer.id))
            .await?;
        assert_redirect(response, &member_management()).await?;

        let response = owner.browser.post(&member_action("ban", banned.id)).await?;
        assert_redirect(response, &member_management()).await?;

        Ok(Self {
            owner,
            officer,
            member,
            applicant,
            banned,
        })
    }
}

/// `/applicants/Beatles/`
pub fn applicants() -> String {
    format!("/applicants/{CLUB}/")
}

/// `/applicants/Beatles/accept/<id>/`
pub fn accept(user_id: UserId) -> String {
    format!("/applicants/{CLUB}/accept/{user_id}/")
}

/// `/applicants/Beatles/reject/<id>/`
pub fn reject(user_id: UserId) -> String {
    format!("/applicants/{CLUB}/reject/{user_id}/")
}

/// `/club/Beatles/member_management/`
pub fn member_management() -> String {
    format!("/club/{CLUB}/member_management/")
}

/// `/club/Beatles/member_management/<action>/<id>/`
pub fn member_action(action: &str, user_id: UserId) -> String {
    format!("/club/{CLUB}/member_management/{action}/{user_id}/")
}
