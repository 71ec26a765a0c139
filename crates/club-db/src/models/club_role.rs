//! Role ledger database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{ClubModel, UserModel};

/// Database model for the club_roles table
#[derive(Debug, Clone, FromRow)]
pub struct ClubRoleModel {
    pub user_id: i64,
    pub club_id: i64,
    pub club_role: String,
    pub updated_at: DateTime<Utc>,
}

/// A user row joined with their tag in one club
#[derive(Debug, Clone, FromRow)]
pub struct ClubMemberRow {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub club_role: String,
}

/// A club row joined with one user's tag in it
#[derive(Debug, Clone, FromRow)]
pub struct UserClubRoleRow {
    #[sqlx(flatten)]
    pub club: ClubModel,
    pub club_role: String,
}
