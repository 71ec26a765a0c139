//! Membership service
//!
//! Every ledger transition is an atomic conditional operation. When the
//! target is not in the expected state the call succeeds as
//! [`TransitionOutcome::NoOp`] and nothing changes.

use club_core::entities::Club;
use club_core::value_objects::{RoleTag, UserId};
use club_core::{Caller, DomainError};
use tracing::{debug, info, instrument};

use crate::dto::{ApplicantsPage, ClubSummary, MemberEntry, MemberManagementPage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::guard::{AccessGuard, Authorized};

/// Result of a ledger transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The row changed
    Applied,
    /// The target was not in the expected state; nothing changed
    NoOp,
}

impl TransitionOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<bool> for TransitionOutcome {
    fn from(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::NoOp
        }
    }
}

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn guard(&self) -> AccessGuard<'a> {
        AccessGuard::new(self.ctx)
    }

    // =========================================================================
    // Applicants
    // =========================================================================

    /// Users holding `Applicant` in the club. Officer or above.
    #[instrument(skip(self))]
    pub async fn list_applicants(
        &self,
        caller: Caller,
        club_name: &str,
    ) -> ServiceResult<ApplicantsPage> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;

        let applicants = self
            .ctx
            .role_repo()
            .members_with_tags(actor.club.id, &[RoleTag::Applicant])
            .await?;

        Ok(ApplicantsPage {
            club: ClubSummary::from(&actor.club),
            applicants: applicants.iter().map(MemberEntry::from).collect(),
        })
    }

    /// `Applicant` to `Member`. Officer or above.
    #[instrument(skip(self))]
    pub async fn accept_applicant(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;

        let changed = self
            .ctx
            .role_repo()
            .transition(target, actor.club.id, RoleTag::Applicant, RoleTag::Member)
            .await?;

        Ok(record("Applicant accepted", &actor, target, changed))
    }

    /// Delete an `Applicant` row. Officer or above.
    #[instrument(skip(self))]
    pub async fn reject_applicant(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;

        let changed = self
            .ctx
            .role_repo()
            .remove_if(target, actor.club.id, RoleTag::Applicant)
            .await?;

        Ok(record("Applicant rejected", &actor, target, changed))
    }

    // =========================================================================
    // Member management
    // =========================================================================

    /// Active members and banned users as two lists. Officer or above.
    #[instrument(skip(self))]
    pub async fn list_members_and_banned(
        &self,
        caller: Caller,
        club_name: &str,
    ) -> ServiceResult<MemberManagementPage> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;
        let roles = self.ctx.role_repo();

        let members = roles
            .members_with_tags(actor.club.id, &RoleTag::ACTIVE)
            .await?;
        let banned = roles
            .members_with_tags(actor.club.id, &[RoleTag::Banned])
            .await?;

        Ok(MemberManagementPage::new(
            &actor.club,
            actor.role,
            members.iter().map(MemberEntry::from).collect(),
            banned.iter().map(MemberEntry::from).collect(),
        ))
    }

    /// `Member` to `Officer`. Owner only.
    #[instrument(skip(self))]
    pub async fn promote(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Owner).await?;

        let changed = self
            .ctx
            .role_repo()
            .transition(target, actor.club.id, RoleTag::Member, RoleTag::Officer)
            .await?;

        Ok(record("Member promoted", &actor, target, changed))
    }

    /// `Officer` to `Member`. Owner only.
    #[instrument(skip(self))]
    pub async fn demote(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Owner).await?;

        let changed = self
            .ctx
            .role_repo()
            .transition(target, actor.club.id, RoleTag::Officer, RoleTag::Member)
            .await?;

        Ok(record("Officer demoted", &actor, target, changed))
    }

    /// Hand ownership to an officer; the previous owner becomes an officer
    #[instrument(skip(self))]
    pub async fn transfer_ownership(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Owner).await?;

        if target == actor.user_id {
            return Ok(TransitionOutcome::NoOp);
        }

        let changed = self
            .ctx
            .role_repo()
            .transfer_ownership(actor.club.id, actor.user_id, target)
            .await?;

        Ok(record("Ownership transferred", &actor, target, changed))
    }

    /// Ban a user. Officer or above, and only below the actor's own rank.
    ///
    /// A user with no row gets a `Banned` row. The write is conditional on
    /// the tag observed here, so a concurrent promotion turns it into a no-op.
    #[instrument(skip(self))]
    pub async fn ban(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;

        if target == actor.user_id {
            debug!(club_id = %actor.club.id, actor_id = %actor.user_id, "Refusing self-ban");
            return Ok(TransitionOutcome::NoOp);
        }

        if self.ctx.user_repo().find_by_id(target).await?.is_none() {
            return Ok(TransitionOutcome::NoOp);
        }

        let roles = self.ctx.role_repo();
        let changed = match roles.get_role(target, actor.club.id).await? {
            None => {
                roles
                    .insert_if_absent(target, actor.club.id, RoleTag::Banned)
                    .await?
            }
            Some(RoleTag::Banned) => false,
            Some(current) if outranks(actor.role, current) => {
                roles
                    .transition(target, actor.club.id, current, RoleTag::Banned)
                    .await?
            }
            Some(current) => {
                debug!(
                    club_id = %actor.club.id,
                    user_id = %target,
                    target_role = %current,
                    "Target rank is not below the actor's"
                );
                false
            }
        };

        Ok(record("User banned", &actor, target, changed))
    }

    /// Remove a `Banned` row, leaving the user unassociated. Officer or above.
    #[instrument(skip(self))]
    pub async fn unban(
        &self,
        caller: Caller,
        club_name: &str,
        target: UserId,
    ) -> ServiceResult<TransitionOutcome> {
        let actor = self.guard().require(caller, club_name, RoleTag::Officer).await?;

        let changed = self
            .ctx
            .role_repo()
            .remove_if(target, actor.club.id, RoleTag::Banned)
            .await?;

        Ok(record("User unbanned", &actor, target, changed))
    }

    // =========================================================================
    // Self service
    // =========================================================================

    /// Ask to join a club. Any existing row, including `Banned`, makes this a no-op.
    #[instrument(skip(self))]
    pub async fn apply(&self, caller: Caller, club_name: &str) -> ServiceResult<TransitionOutcome> {
        let user_id = self.guard().require_authenticated(caller)?;
        let club = self.find_club(club_name).await?;

        let changed = self
            .ctx
            .role_repo()
            .insert_if_absent(user_id, club.id, RoleTag::Applicant)
            .await?;

        if changed {
            info!(club_id = %club.id, user_id = %user_id, "Applied to club");
        }
        Ok(changed.into())
    }

    /// Give up an application or membership. Owners must transfer first.
    #[instrument(skip(self))]
    pub async fn leave(&self, caller: Caller, club_name: &str) -> ServiceResult<TransitionOutcome> {
        let actor = self
            .guard()
            .require(caller, club_name, RoleTag::Applicant)
            .await?;

        if actor.role == RoleTag::Owner {
            return Err(DomainError::CannotLeaveOwnedClub.into());
        }

        let changed = self
            .ctx
            .role_repo()
            .remove_if(actor.user_id, actor.club.id, actor.role)
            .await?;

        if changed {
            info!(club_id = %actor.club.id, user_id = %actor.user_id, "Left club");
        }
        Ok(changed.into())
    }

    async fn find_club(&self, club_name: &str) -> ServiceResult<Club> {
        self.ctx
            .club_repo()
            .find_by_name(club_name)
            .await?
            .ok_or_else(|| ServiceError::not_found("Club", club_name))
    }
}

/// Whether `actor` sits strictly above `target` on the promotion chain
fn outranks(actor: RoleTag, target: RoleTag) -> bool {
    match (actor.rank(), target.rank()) {
        (Some(a), Some(t)) => a > t,
        _ => false,
    }
}

fn record(action: &str, actor: &Authorized, target: UserId, changed: bool) -> TransitionOutcome {
    if changed {
        info!(
            club_id = %actor.club.id,
            user_id = %target,
            actor_id = %actor.user_id,
            "{action}"
        );
    } else {
        debug!(
            club_id = %actor.club.id,
            user_id = %target,
            actor_id = %actor.user_id,
            "{action}: target not in expected state, nothing to do"
        );
    }
    changed.into()
}
