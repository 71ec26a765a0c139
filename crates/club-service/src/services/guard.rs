//! Access guard
//!
//! Looks up the caller's tag in a club and runs it through
//! [`club_core::evaluate_caller`]. Handlers call it explicitly before doing
//! any work.

use club_core::entities::Club;
use club_core::value_objects::{RoleTag, UserId};
use club_core::{evaluate_caller, AccessDecision, Caller, DenialReason};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A caller that passed the guard for one club
#[derive(Debug, Clone)]
pub struct Authorized {
    pub user_id: UserId,
    pub club: Club,
    /// The tag that granted access
    pub role: RoleTag,
}

/// Role-threshold guard over the ledger
pub struct AccessGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessGuard<'a> {
    /// Create a new AccessGuard
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Decide whether `caller` holds at least `threshold` in `club_name`.
    ///
    /// An unknown club is treated the same as having no row in it.
    /// Only storage failures are returned as `Err`.
    pub async fn authorize(
        &self,
        caller: Caller,
        club_name: &str,
        threshold: RoleTag,
    ) -> ServiceResult<AccessDecision> {
        match self.require(caller, club_name, threshold).await {
            Ok(authorized) => Ok(AccessDecision::Allowed(authorized.role)),
            Err(ServiceError::Denied(reason)) => Ok(AccessDecision::Denied(reason)),
            Err(e) => Err(e),
        }
    }

    /// Like [`Self::authorize`] but returns the resolved club on success and
    /// `ServiceError::Denied` on refusal
    #[instrument(skip(self))]
    pub async fn require(
        &self,
        caller: Caller,
        club_name: &str,
        threshold: RoleTag,
    ) -> ServiceResult<Authorized> {
        let Some(user_id) = caller.user_id() else {
            return Err(deny(club_name, DenialReason::NotAuthenticated));
        };

        let Some(club) = self.ctx.club_repo().find_by_name(club_name).await? else {
            return Err(deny(club_name, DenialReason::NotAMember));
        };

        let current = self.ctx.role_repo().get_role(user_id, club.id).await?;

        match evaluate_caller(caller, current, threshold).into_result() {
            Ok(role) => Ok(Authorized {
                user_id,
                club,
                role,
            }),
            Err(reason) => Err(deny(club_name, reason)),
        }
    }

    /// Any signed-in caller passes
    pub fn require_authenticated(&self, caller: Caller) -> ServiceResult<UserId> {
        caller
            .user_id()
            .ok_or(ServiceError::Denied(DenialReason::NotAuthenticated))
    }
}

fn deny(club_name: &str, reason: DenialReason) -> ServiceError {
    debug!(club = %club_name, reason = %reason, "Access denied");
    ServiceError::Denied(reason)
}
