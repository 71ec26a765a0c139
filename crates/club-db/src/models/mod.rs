//! Database models - SQLx-compatible structs for PostgreSQL tables

mod club;
mod club_role;
mod user;

pub use club::ClubModel;
pub use club_role::{ClubMemberRow, ClubRoleModel, UserClubRoleRow};
pub use user::UserModel;
