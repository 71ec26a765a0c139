//! User service
//!
//! Profile and landing pages for the signed-in caller.

use club_core::entities::User;
use club_core::value_objects::{ChessExperienceLevel, UserId};
use club_core::Caller;
use tracing::{info, instrument};

use crate::dto::{ClubEntry, FeedPage, ProfileForm, ProfilePage, UserSummary};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::guard::AccessGuard;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's profile with every club they hold a tag in
    #[instrument(skip(self))]
    pub async fn profile(&self, caller: Caller) -> ServiceResult<ProfilePage> {
        let user_id = AccessGuard::new(self.ctx).require_authenticated(caller)?;
        let user = self.load(user_id).await?;
        let memberships = self.club_entries(user_id).await?;

        Ok(ProfilePage {
            user: UserSummary::from(&user),
            memberships,
        })
    }

    /// Edit the caller's name, bio and experience level
    #[instrument(skip(self, form))]
    pub async fn update_profile(&self, caller: Caller, form: ProfileForm) -> ServiceResult<User> {
        let user_id = AccessGuard::new(self.ctx).require_authenticated(caller)?;
        let level = ChessExperienceLevel::try_from(form.chess_experience_level)?;

        let user = self
            .ctx
            .user_repo()
            .update_profile(user_id, &form.first_name, &form.last_name, &form.bio, level)
            .await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    /// Landing page: the caller and the clubs they belong to
    #[instrument(skip(self))]
    pub async fn feed(&self, caller: Caller) -> ServiceResult<FeedPage> {
        let user_id = AccessGuard::new(self.ctx).require_authenticated(caller)?;
        let user = self.load(user_id).await?;
        let clubs = self.club_entries(user_id).await?;

        Ok(FeedPage {
            user: UserSummary::from(&user),
            clubs,
        })
    }

    async fn load(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn club_entries(&self, user_id: UserId) -> ServiceResult<Vec<ClubEntry>> {
        let memberships = self.ctx.role_repo().memberships_for_user(user_id).await?;
        Ok(memberships.iter().map(ClubEntry::from).collect())
    }
}
