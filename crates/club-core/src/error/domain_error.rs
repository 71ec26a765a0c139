//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Club not found: {0}")]
    ClubNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid role tag: {0}")]
    InvalidRoleTag(String),

    #[error("Invalid chess experience level: {0}")]
    InvalidExperienceLevel(i16),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Club name already in use")]
    ClubNameAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot leave owned club (transfer ownership first)")]
    CannotLeaveOwnedClub,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ClubNotFound(_) => "UNKNOWN_CLUB",

            // Validation
            Self::InvalidRoleTag(_) => "INVALID_ROLE_TAG",
            Self::InvalidExperienceLevel(_) => "INVALID_EXPERIENCE_LEVEL",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ClubNameAlreadyExists => "CLUB_NAME_ALREADY_EXISTS",

            // Business Rules
            Self::CannotLeaveOwnedClub => "CANNOT_LEAVE_OWNED_CLUB",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::ClubNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoleTag(_) | Self::InvalidExperienceLevel(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::ClubNameAlreadyExists
        )
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else if matches!(self, Self::CannotLeaveOwnedClub) {
            422
        } else {
            500
        }
    }
}
