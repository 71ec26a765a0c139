//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;

use crate::entities::{Club, ClubMember, NewClub, NewUser, User, UserClubRole};
use crate::error::DomainError;
use crate::value_objects::{ChessExperienceLevel, ClubId, RoleTag, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Store a new user and return it with its assigned id
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Update the editable profile fields
    async fn update_profile(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        bio: &str,
        level: ChessExperienceLevel,
    ) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Club Repository
// ============================================================================

#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Find club by ID
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>>;

    /// Find club by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Club>>;

    /// All clubs ordered by name
    async fn list_all(&self) -> RepoResult<Vec<Club>>;

    /// Store a new club with `owner` holding `Owner` in the same transaction
    async fn create(&self, club: &NewClub, owner: UserId) -> RepoResult<Club>;
}

// ============================================================================
// Role Repository (the ledger)
// ============================================================================

/// The (user, club) -> tag relation. Every method keeps at most one row per pair.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Current tag, or `None` when the user is not associated with the club
    async fn get_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<Option<RoleTag>>;

    /// Upsert: create the row or overwrite whatever tag it holds
    async fn set_role(&self, user_id: UserId, club_id: ClubId, role: RoleTag) -> RepoResult<()>;

    /// Delete the row. Returns `false` when there was nothing to delete.
    async fn remove_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<bool>;

    /// Create the row only if none exists. Returns whether a row was created.
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        club_id: ClubId,
        role: RoleTag,
    ) -> RepoResult<bool>;

    /// Atomically change `from` to `to`. Returns `false` if the row is absent
    /// or holds a different tag.
    async fn transition(
        &self,
        user_id: UserId,
        club_id: ClubId,
        from: RoleTag,
        to: RoleTag,
    ) -> RepoResult<bool>;

    /// Atomically delete the row if it holds `expected`
    async fn remove_if(
        &self,
        user_id: UserId,
        club_id: ClubId,
        expected: RoleTag,
    ) -> RepoResult<bool>;

    /// Swap `Owner` on `current_owner` with `Officer` on `new_owner` as one unit.
    /// Returns `false` and changes nothing unless both rows hold those tags.
    async fn transfer_ownership(
        &self,
        club_id: ClubId,
        current_owner: UserId,
        new_owner: UserId,
    ) -> RepoResult<bool>;

    /// Users in `club_id` whose tag is one of `tags`, ordered by username
    async fn members_with_tags(
        &self,
        club_id: ClubId,
        tags: &[RoleTag],
    ) -> RepoResult<Vec<ClubMember>>;

    /// Every club the user holds a row in, ordered by club name
    async fn memberships_for_user(&self, user_id: UserId) -> RepoResult<Vec<UserClubRole>>;
}
