//! User model -> entity mapper

use club_core::entities::User;
use club_core::error::DomainError;
use club_core::value_objects::{ChessExperienceLevel, UserId};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            chess_experience_level: ChessExperienceLevel::try_from(model.chess_experience_level)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
