//! Repository traits (ports)

mod repositories;

pub use repositories::{ClubRepository, RepoResult, RoleRepository, UserRepository};
