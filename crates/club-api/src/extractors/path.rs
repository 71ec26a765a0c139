//! Path parameter extractors

use club_core::UserId;
use serde::Deserialize;

use crate::response::ApiError;

/// `/…/<club_name>/…`
#[derive(Debug, Deserialize)]
pub struct ClubPath {
    pub club_name: String,
}

/// `/…/<club_name>/…/<user_id>/`
#[derive(Debug, Deserialize)]
pub struct ClubUserPath {
    pub club_name: String,
    pub user_id: String,
}

impl ClubUserPath {
    /// Parse user_id as UserId
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}
