//! Club service
//!
//! Creating and listing clubs.

use std::collections::HashMap;

use club_core::entities::{Club, NewClub};
use club_core::Caller;
use tracing::{info, instrument};

use crate::dto::{ClubEntry, ClubListPage, ClubSummary, CreateClubForm};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::guard::AccessGuard;

/// Club service
pub struct ClubService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClubService<'a> {
    /// Create a new ClubService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a club; the caller becomes its owner
    #[instrument(skip(self, form), fields(club_name = %form.name))]
    pub async fn create(&self, caller: Caller, form: CreateClubForm) -> ServiceResult<Club> {
        let owner = AccessGuard::new(self.ctx).require_authenticated(caller)?;

        let club = self
            .ctx
            .club_repo()
            .create(
                &NewClub {
                    name: form.name,
                    location: form.location,
                    description: form.description,
                },
                owner,
            )
            .await?;

        info!(club_id = %club.id, user_id = %owner, "Club created");
        Ok(club)
    }

    /// Every club, annotated with the caller's tag where they have one
    #[instrument(skip(self))]
    pub async fn list(&self, caller: Caller) -> ServiceResult<ClubListPage> {
        let user_id = AccessGuard::new(self.ctx).require_authenticated(caller)?;

        let roles: HashMap<_, _> = self
            .ctx
            .role_repo()
            .memberships_for_user(user_id)
            .await?
            .into_iter()
            .map(|entry| (entry.club.id, entry.role))
            .collect();

        let clubs = self
            .ctx
            .club_repo()
            .list_all()
            .await?
            .iter()
            .map(|club| ClubEntry {
                club: ClubSummary::from(club),
                role: roles.get(&club.id).copied(),
            })
            .collect();

        Ok(ClubListPage { clubs })
    }
}
