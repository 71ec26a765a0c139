//! Service context - dependency container for services
//!
//! Holds the repositories, the session issuer and the optional database pool.

use std::sync::Arc;

use club_common::auth::{PasswordService, SessionService};
use club_core::traits::{ClubRepository, RoleRepository, UserRepository};
use club_db::{MemoryStore, PgClubRepository, PgPool, PgRoleRepository, PgUserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (absent for the in-memory backend)
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    club_repo: Arc<dyn ClubRepository>,
    role_repo: Arc<dyn RoleRepository>,

    // Services
    session_service: Arc<SessionService>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        club_repo: Arc<dyn ClubRepository>,
        role_repo: Arc<dyn RoleRepository>,
        session_service: Arc<SessionService>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            club_repo,
            role_repo,
            session_service,
            password_service: PasswordService::new(),
        }
    }

    /// Context backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, session_service: Arc<SessionService>) -> Self {
        Self::new(
            Some(pool.clone()),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgClubRepository::new(pool.clone())),
            Arc::new(PgRoleRepository::new(pool)),
            session_service,
        )
    }

    /// Context backed by a single in-memory store
    pub fn in_memory(store: MemoryStore, session_service: Arc<SessionService>) -> Self {
        Self::new(
            None,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            session_service,
        )
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if this context uses one
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the club repository
    pub fn club_repo(&self) -> &dyn ClubRepository {
        self.club_repo.as_ref()
    }

    /// Get the role ledger
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    // === Services ===

    /// Get the session token service
    pub fn session_service(&self) -> &SessionService {
        self.session_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    club_repo: Option<Arc<dyn ClubRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    session_service: Option<Arc<SessionService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn club_repo(mut self, repo: Arc<dyn ClubRepository>) -> Self {
        self.club_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn session_service(mut self, service: Arc<SessionService>) -> Self {
        self.session_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.club_repo
                .ok_or_else(|| ServiceError::validation("club_repo is required"))?,
            self.role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.session_service
                .ok_or_else(|| ServiceError::validation("session_service is required"))?,
        ))
    }
}
