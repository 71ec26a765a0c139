//! PostgreSQL implementation of RoleRepository
//!
//! The primary key `(user_id, club_id)` keeps one row per pair. Conditional
//! transitions are single statements whose `rows_affected` says whether they
//! applied.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{ClubMember, Membership, UserClubRole};
use club_core::traits::{RepoResult, RoleRepository};
use club_core::value_objects::{ClubId, RoleTag, UserId};

use crate::models::{ClubMemberRow, ClubRoleModel, UserClubRoleRow};

use super::error::map_db_error;

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn get_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<Option<RoleTag>> {
        let result = sqlx::query_as::<_, ClubRoleModel>(
            r"
            SELECT user_id, club_id, club_role, updated_at
            FROM club_roles
            WHERE user_id = $1 AND club_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result
            .map(Membership::try_from)
            .transpose()?
            .map(|membership| membership.role))
    }

    #[instrument(skip(self))]
    async fn set_role(&self, user_id: UserId, club_id: ClubId, role: RoleTag) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO club_roles (user_id, club_id, club_role)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, club_id)
            DO UPDATE SET club_role = EXCLUDED.club_role, updated_at = NOW()
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .bind(role.code())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_role(&self, user_id: UserId, club_id: ClubId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM club_roles WHERE user_id = $1 AND club_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        club_id: ClubId,
        role: RoleTag,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO club_roles (user_id, club_id, club_role)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, club_id) DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .bind(role.code())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        user_id: UserId,
        club_id: ClubId,
        from: RoleTag,
        to: RoleTag,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE club_roles
            SET club_role = $4, updated_at = NOW()
            WHERE user_id = $1 AND club_id = $2 AND club_role = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .bind(from.code())
        .bind(to.code())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_if(
        &self,
        user_id: UserId,
        club_id: ClubId,
        expected: RoleTag,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM club_roles
            WHERE user_id = $1 AND club_id = $2 AND club_role = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(club_id.into_inner())
        .bind(expected.code())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn transfer_ownership(
        &self,
        club_id: ClubId,
        current_owner: UserId,
        new_owner: UserId,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let demoted = sqlx::query(
            r"
            UPDATE club_roles
            SET club_role = $3, updated_at = NOW()
            WHERE club_id = $1 AND user_id = $2 AND club_role = $4
            ",
        )
        .bind(club_id.into_inner())
        .bind(current_owner.into_inner())
        .bind(RoleTag::Officer.code())
        .bind(RoleTag::Owner.code())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if demoted.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Ok(false);
        }

        let promoted = sqlx::query(
            r"
            UPDATE club_roles
            SET club_role = $3, updated_at = NOW()
            WHERE club_id = $1 AND user_id = $2 AND club_role = $4
            ",
        )
        .bind(club_id.into_inner())
        .bind(new_owner.into_inner())
        .bind(RoleTag::Owner.code())
        .bind(RoleTag::Officer.code())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if promoted.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn members_with_tags(
        &self,
        club_id: ClubId,
        tags: &[RoleTag],
    ) -> RepoResult<Vec<ClubMember>> {
        let codes: Vec<String> = tags.iter().map(|tag| tag.code().to_string()).collect();

        let rows = sqlx::query_as::<_, ClubMemberRow>(
            r"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.bio,
                   u.chess_experience_level, u.created_at, u.updated_at, r.club_role
            FROM club_roles r
            JOIN users u ON u.id = r.user_id
            WHERE r.club_id = $1 AND r.club_role = ANY($2)
            ORDER BY u.username
            ",
        )
        .bind(club_id.into_inner())
        .bind(codes)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ClubMember::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn memberships_for_user(&self, user_id: UserId) -> RepoResult<Vec<UserClubRole>> {
        let rows = sqlx::query_as::<_, UserClubRoleRow>(
            r"
            SELECT c.id, c.club_name, c.location, c.description, c.created_at, r.club_role
            FROM club_roles r
            JOIN clubs c ON c.id = r.club_id
            WHERE r.user_id = $1
            ORDER BY c.club_name
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(UserClubRole::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRoleRepository>();
    }
}
