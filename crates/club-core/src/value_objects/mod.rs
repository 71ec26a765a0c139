//! Value objects - immutable types that represent domain concepts

mod experience;
mod ids;
mod role_tag;

pub use experience::ChessExperienceLevel;
pub use ids::{ClubId, IdParseError, UserId};
pub use role_tag::RoleTag;
