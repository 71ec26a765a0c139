//! Role ledger model -> entity mappers

use club_core::entities::{ClubMember, Membership, UserClubRole};
use club_core::error::DomainError;
use club_core::value_objects::{ClubId, RoleTag, UserId};

use crate::models::{ClubMemberRow, ClubRoleModel, UserClubRoleRow};

/// Parse a stored `club_role` code
pub fn parse_role(code: &str) -> Result<RoleTag, DomainError> {
    code.parse()
}

impl TryFrom<ClubRoleModel> for Membership {
    type Error = DomainError;

    fn try_from(model: ClubRoleModel) -> Result<Self, Self::Error> {
        Ok(Membership {
            user_id: UserId::new(model.user_id),
            club_id: ClubId::new(model.club_id),
            role: parse_role(&model.club_role)?,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ClubMemberRow> for ClubMember {
    type Error = DomainError;

    fn try_from(row: ClubMemberRow) -> Result<Self, Self::Error> {
        Ok(ClubMember {
            role: parse_role(&row.club_role)?,
            user: row.user.try_into()?,
        })
    }
}

impl TryFrom<UserClubRoleRow> for UserClubRole {
    type Error = DomainError;

    fn try_from(row: UserClubRoleRow) -> Result<Self, Self::Error> {
        Ok(UserClubRole {
            role: parse_role(&row.club_role)?,
            club: row.club.into(),
        })
    }
}
