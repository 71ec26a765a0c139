//! User entity - a registered chess player

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ChessExperienceLevel, UserId};

/// User account. Credential material lives only in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub chess_experience_level: ChessExperienceLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply a profile edit
    pub fn update_profile(
        &mut self,
        first_name: String,
        last_name: String,
        bio: String,
        level: ChessExperienceLevel,
    ) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.bio = bio;
        self.chess_experience_level = level;
        self.updated_at = Utc::now();
    }
}

/// Data for a user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub chess_experience_level: ChessExperienceLevel,
}
