//! # club-core
//!
//! Domain layer containing entities, value objects, the club access rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{evaluate, evaluate_caller, AccessDecision, Caller, DenialReason};
pub use entities::{Club, ClubMember, Membership, NewClub, NewUser, User, UserClubRole};
pub use error::DomainError;
pub use traits::{ClubRepository, RepoResult, RoleRepository, UserRepository};
pub use value_objects::{ChessExperienceLevel, ClubId, IdParseError, RoleTag, UserId};
