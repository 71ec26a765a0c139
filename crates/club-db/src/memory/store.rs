use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::instrument;

use club_core::entities::{
    Club, ClubMember, Membership, NewClub, NewUser, User, UserClubRole,
};
use club_core::error::DomainError;
use club_core::traits::{ClubRepository, RepoResult, RoleRepository, UserRepository};
use club_core::value_objects::{ChessExperienceLevel, ClubId, RoleTag, UserId};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, StoredUser>,
    clubs: BTreeMap<ClubId, Club>,
    roles: HashMap<(UserId, ClubId), Membership>,
    next_user_id: i64,
    next_club_id: i64,
}

impl State {
    fn allocate_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }

    fn allocate_club_id(&mut self) -> ClubId {
        self.next_club_id += 1;
        ClubId::new(self.next_club_id)
    }
}

/// Process-local store for users, clubs and the role ledger
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger rows for the pair (0 or 1)
    pub fn row_count(&self, user_id: UserId, club_id: ClubId) -> usize {
        usize::from(self.state.read().roles.contains_key(&(user_id, club_id)))
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).map(|s| s.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|s| s.user.username == username)
            .map(|s| s.user.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|s| s.user.username == username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state.read().users.values().any(|s| s.user.email == email))
    }

    #[instrument(skip(self, user, password_hash), fields(username = %user.username))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.state.write();

        if state.users.values().any(|s| s.user.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if state.users.values().any(|s| s.user.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let stored = User {
            id: state.allocate_user_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            chess_experience_level: user.chess_experience_level,
            created_at: now,
            updated_at: now,
        };

        state.users.insert(
            stored.id,
            StoredUser {
                user: stored.clone(),
                password_hash: password_hash.to_string(),
            },
        );

        Ok(stored)
    }

    async fn update_profile(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        bio: &str,
        level: ChessExperienceLevel,
    ) -> RepoResult<User> {
        let mut state = self.state.write();
        let stored = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        stored.user.update_profile(
            first_name.to_string(),
            last_name.to_string(),
            bio.to_string(),
            level,
        );

        Ok(stored.user.clone())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .state
            .read()
            .users
            .get(&id)
            .map(|s| s.password_hash.clone()))
    }
}

// ============================================================================
// Clubs
// ============================================================================

#[async_trait]
impl ClubRepository for MemoryStore {
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>> {
        Ok(self.state.read().clubs.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Club>> {
        Ok(self
            .state
            .read()
            .clubs
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Club>> {
        let mut clubs: Vec<Club> = self.state.read().clubs.values().cloned().collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }

    #[instrument(skip(self, club), fields(club_name = %club.name))]
    async fn create(&self, club: &NewClub, owner: UserId) -> RepoResult<Club> {
        let mut state = self.state.write();

        if state.clubs.values().any(|c| c.name == club.name) {
            return Err(DomainError::ClubNameAlreadyExists);
        }
        if !state.users.contains_key(&owner) {
            return Err(DomainError::UserNotFound(owner));
        }

        let stored = Club {
            id: state.allocate_club_id(),
            name: club.name.clone(),
            location: club.location.clone(),
            description: club.description.clone(),
            created_at: Utc::now(),
        };

        state.clubs.insert(stored.id, stored.clone());
        state.roles.insert(
            (owner, stored.id),
            Membership::new(owner, stored.id, RoleTag::Owner),
        );

        Ok(stored)
    }
}

// ============================================================================
// Role ledger
// ============================================================================

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn get_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<Option<RoleTag>> {
        Ok(self
            .state
            .read()
            .roles
            .get(&(user_id, club_id))
            .map(|m| m.role))
    }

    async fn set_role(&self, user_id: UserId, club_id: ClubId, role: RoleTag) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }
        if !state.clubs.contains_key(&club_id) {
            return Err(DomainError::ClubNotFound(club_id.to_string()));
        }
        state
            .roles
            .insert((user_id, club_id), Membership::new(user_id, club_id, role));
        Ok(())
    }

    async fn remove_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<bool> {
        Ok(self
            .state
            .write()
            .roles
            .remove(&(user_id, club_id))
            .is_some())
    }

    async fn insert_if_absent(
        &self,
        user_id: UserId,
        club_id: ClubId,
        role: RoleTag,
    ) -> RepoResult<bool> {
        let mut state = self.state.write();
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }
        if !state.clubs.contains_key(&club_id) {
            return Err(DomainError::ClubNotFound(club_id.to_string()));
        }
        if state.roles.contains_key(&(user_id, club_id)) {
            return Ok(false);
        }
        state
            .roles
            .insert((user_id, club_id), Membership::new(user_id, club_id, role));
        Ok(true)
    }

    async fn transition(
        &self,
        user_id: UserId,
        club_id: ClubId,
        from: RoleTag,
        to: RoleTag,
    ) -> RepoResult<bool> {
        let mut state = self.state.write();
        match state.roles.get_mut(&(user_id, club_id)) {
            Some(row) if row.role == from => {
                row.role = to;
                row.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove_if(
        &self,
        user_id: UserId,
        club_id: ClubId,
        expected: RoleTag,
    ) -> RepoResult<bool> {
        let mut state = self.state.write();
        let key = (user_id, club_id);
        if state.roles.get(&key).is_some_and(|row| row.role == expected) {
            state.roles.remove(&key);
            return Ok(true);
        }
        Ok(false)
    }

    async fn transfer_ownership(
        &self,
        club_id: ClubId,
        current_owner: UserId,
        new_owner: UserId,
    ) -> RepoResult<bool> {
        let mut state = self.state.write();
        let owner_ok = state
            .roles
            .get(&(current_owner, club_id))
            .is_some_and(|row| row.role == RoleTag::Owner);
        let officer_ok = state
            .roles
            .get(&(new_owner, club_id))
            .is_some_and(|row| row.role == RoleTag::Officer);
        if !(owner_ok && officer_ok) {
            return Ok(false);
        }

        let now = Utc::now();
        for (user_id, role) in [(current_owner, RoleTag::Officer), (new_owner, RoleTag::Owner)] {
            if let Some(row) = state.roles.get_mut(&(user_id, club_id)) {
                row.role = role;
                row.updated_at = now;
            }
        }
        Ok(true)
    }

    async fn members_with_tags(
        &self,
        club_id: ClubId,
        tags: &[RoleTag],
    ) -> RepoResult<Vec<ClubMember>> {
        let state = self.state.read();
        let mut members: Vec<ClubMember> = state
            .roles
            .values()
            .filter(|row| row.club_id == club_id && tags.contains(&row.role))
            .filter_map(|row| {
                state.users.get(&row.user_id).map(|s| ClubMember {
                    user: s.user.clone(),
                    role: row.role,
                })
            })
            .collect();
        members.sort_by(|a, b| a.user.username.cmp(&b.user.username));
        Ok(members)
    }

    async fn memberships_for_user(&self, user_id: UserId) -> RepoResult<Vec<UserClubRole>> {
        let state = self.state.read();
        let mut clubs: Vec<UserClubRole> = state
            .roles
            .values()
            .filter(|row| row.user_id == user_id)
            .filter_map(|row| {
                state.clubs.get(&row.club_id).map(|club| UserClubRole {
                    club: club.clone(),
                    role: row.role,
                })
            })
            .collect();
        clubs.sort_by(|a, b| a.club.name.cmp(&b.club.name));
        Ok(clubs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{name}@example.org"),
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            bio: String::new(),
            chess_experience_level: ChessExperienceLevel::Beginner,
        }
    }

    fn new_club(name: &str) -> NewClub {
        NewClub {
            name: name.to_string(),
            location: "Liverpool".to_string(),
            description: String::new(),
        }
    }

    async fn seeded() -> (MemoryStore, UserId, UserId, ClubId) {
        let store = MemoryStore::new();
        let owner = UserRepository::create(&store, &new_user("john"), "hash")
            .await
            .unwrap();
        let other = UserRepository::create(&store, &new_user("paul"), "hash")
            .await
            .unwrap();
        let club = ClubRepository::create(&store, &new_club("Beatles"), owner.id)
            .await
            .unwrap();
        (store, owner.id, other.id, club.id)
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryStore>();
    }

    #[tokio::test]
    async fn test_duplicate_user_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &new_user("john"), "hash")
            .await
            .unwrap();

        let err = UserRepository::create(&store, &new_user("john"), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UsernameAlreadyExists));

        let mut same_email = new_user("george");
        same_email.email = "john@example.org".to_string();
        let err = UserRepository::create(&store, &same_email, "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_club_creator_is_owner() {
        let (store, owner, _, club) = seeded().await;
        assert_eq!(
            store.get_role(owner, club).await.unwrap(),
            Some(RoleTag::Owner)
        );
        let err = ClubRepository::create(&store, &new_club("Beatles"), owner)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ClubNameAlreadyExists));
    }

    #[tokio::test]
    async fn test_one_row_per_pair() {
        let (store, _, user, club) = seeded().await;

        store.set_role(user, club, RoleTag::Applicant).await.unwrap();
        store.set_role(user, club, RoleTag::Member).await.unwrap();
        store.set_role(user, club, RoleTag::Banned).await.unwrap();
        assert!(!store
            .insert_if_absent(user, club, RoleTag::Applicant)
            .await
            .unwrap());

        assert_eq!(store.row_count(user, club), 1);
        assert_eq!(
            store.get_role(user, club).await.unwrap(),
            Some(RoleTag::Banned)
        );
    }

    #[tokio::test]
    async fn test_remove_missing_row_is_noop() {
        let (store, _, user, club) = seeded().await;
        assert!(!store.remove_role(user, club).await.unwrap());
        assert_eq!(store.get_role(user, club).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_conditional_transition() {
        let (store, _, user, club) = seeded().await;
        store.set_role(user, club, RoleTag::Applicant).await.unwrap();

        assert!(store
            .transition(user, club, RoleTag::Applicant, RoleTag::Member)
            .await
            .unwrap());
        assert!(!store
            .transition(user, club, RoleTag::Applicant, RoleTag::Member)
            .await
            .unwrap());
        assert_eq!(
            store.get_role(user, club).await.unwrap(),
            Some(RoleTag::Member)
        );

        assert!(!store.remove_if(user, club, RoleTag::Applicant).await.unwrap());
        assert!(store.remove_if(user, club, RoleTag::Member).await.unwrap());
        assert_eq!(store.row_count(user, club), 0);
    }

    #[tokio::test]
    async fn test_transfer_ownership() {
        let (store, owner, user, club) = seeded().await;

        // Target must be an officer
        store.set_role(user, club, RoleTag::Member).await.unwrap();
        assert!(!store.transfer_ownership(club, owner, user).await.unwrap());
        assert_eq!(
            store.get_role(owner, club).await.unwrap(),
            Some(RoleTag::Owner)
        );

        store.set_role(user, club, RoleTag::Officer).await.unwrap();
        assert!(store.transfer_ownership(club, owner, user).await.unwrap());
        assert_eq!(
            store.get_role(owner, club).await.unwrap(),
            Some(RoleTag::Officer)
        );
        assert_eq!(
            store.get_role(user, club).await.unwrap(),
            Some(RoleTag::Owner)
        );
    }

    #[tokio::test]
    async fn test_members_with_tags_and_memberships() {
        let (store, owner, user, club) = seeded().await;
        store.set_role(user, club, RoleTag::Banned).await.unwrap();

        let active = store
            .members_with_tags(club, &RoleTag::ACTIVE)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].user.id, owner);

        let banned = store
            .members_with_tags(club, &[RoleTag::Banned])
            .await
            .unwrap();
        assert_eq!(banned.len(), 1);
        assert_eq!(banned[0].user.id, user);

        let memberships = store.memberships_for_user(owner).await.unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].club.name, "Beatles");
        assert_eq!(memberships[0].role, RoleTag::Owner);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (store, owner, _, _) = seeded().await;
        let user = store
            .update_profile(owner, "John", "Lennon", "Imagine", ChessExperienceLevel::Expert)
            .await
            .unwrap();
        assert_eq!(user.full_name(), "John Lennon");
        assert_eq!(
            store.get_password_hash(owner).await.unwrap().as_deref(),
            Some("hash")
        );
    }
}
