//! # club-db
//!
//! Storage layer implementing the `club-core` repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL repositories over SQLx (`Pg*Repository`), with row models
//!   and model → entity mappers
//! - Connection pool creation and start-up migrations
//! - [`MemoryStore`], an in-process implementation of the same traits used
//!   by tests and `STORAGE_BACKEND=memory`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use club_db::{create_pool, run_migrations, PgRoleRepository};
//! use club_core::traits::RoleRepository;
//!
//! async fn example(config: &club_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let roles = PgRoleRepository::new(pool);
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgClubRepository, PgRoleRepository, PgUserRepository};
