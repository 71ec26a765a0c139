//! Request DTOs for form submissions
//!
//! All forms implement `Deserialize` and `Validate`. Password strength is
//! checked by the auth service on top of the length rules here.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Forms
// ============================================================================

/// Sign-up form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 30, message = "Username must be 1-30 characters"))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 520, message = "Bio must be at most 520 characters"))]
    pub bio: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Confirmation does not match password"))]
    pub password_confirmation: String,

    #[validate(range(min = 1, max = 5, message = "Chess experience level must be between 1 and 5"))]
    pub chess_experience_level: i16,
}

/// Log-in form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogInForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Where to go after a successful log-in
    #[serde(default)]
    pub next: Option<String>,
}

// ============================================================================
// Profile Forms
// ============================================================================

/// Profile edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 520, message = "Bio must be at most 520 characters"))]
    pub bio: String,

    #[validate(range(min = 1, max = 5, message = "Chess experience level must be between 1 and 5"))]
    pub chess_experience_level: i16,
}

// ============================================================================
// Club Forms
// ============================================================================

/// New club form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClubForm {
    #[validate(length(min = 1, max = 50, message = "Club name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: String,

    #[serde(default)]
    #[validate(length(max = 520, message = "Description must be at most 520 characters"))]
    pub description: String,
}
