//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.

mod club;
mod error;
mod role;
mod user;

pub use club::PgClubRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
