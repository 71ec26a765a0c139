//! Club database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the clubs table
#[derive(Debug, Clone, FromRow)]
pub struct ClubModel {
    pub id: i64,
    pub club_name: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
