//! PostgreSQL implementation of ClubRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{Club, NewClub};
use club_core::error::DomainError;
use club_core::traits::{ClubRepository, RepoResult};
use club_core::value_objects::{ClubId, RoleTag, UserId};

use crate::models::ClubModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ClubRepository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    /// Create a new PgClubRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClubId) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, club_name, location, description, created_at
            FROM clubs
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Club>> {
        let result = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, club_name, location, description, created_at
            FROM clubs
            WHERE club_name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Club::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Club>> {
        let results = sqlx::query_as::<_, ClubModel>(
            r"
            SELECT id, club_name, location, description, created_at
            FROM clubs
            ORDER BY club_name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Club::from).collect())
    }

    #[instrument(skip(self, club), fields(club_name = %club.name))]
    async fn create(&self, club: &NewClub, owner: UserId) -> RepoResult<Club> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ClubModel>(
            r"
            INSERT INTO clubs (club_name, location, description)
            VALUES ($1, $2, $3)
            RETURNING id, club_name, location, description, created_at
            ",
        )
        .bind(&club.name)
        .bind(&club.location)
        .bind(&club.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::ClubNameAlreadyExists))?;

        sqlx::query(
            r"
            INSERT INTO club_roles (user_id, club_id, club_role)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(owner.into_inner())
        .bind(model.id)
        .bind(RoleTag::Owner.code())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Club::from(model))
    }
}
