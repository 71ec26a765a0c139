//! Club entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::ClubId;

/// A chess club, addressed in URLs by its unique name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Data for a club that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClub {
    pub name: String,
    pub location: String,
    pub description: String,
}
