//! Role ledger rows and their joined views

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Club, User};
use crate::value_objects::{ClubId, RoleTag, UserId};

/// One row of the role ledger. At most one exists per (user, club).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub user_id: UserId,
    pub club_id: ClubId,
    pub role: RoleTag,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: UserId, club_id: ClubId, role: RoleTag) -> Self {
        Self {
            user_id,
            club_id,
            role,
            updated_at: Utc::now(),
        }
    }
}

/// A user together with their tag in some club
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubMember {
    pub user: User,
    pub role: RoleTag,
}

/// A club together with some user's tag in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserClubRole {
    pub club: Club,
    pub role: RoleTag,
}
