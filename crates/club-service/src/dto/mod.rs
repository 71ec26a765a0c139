//! Data transfer objects for form input and page output
//!
//! This module provides:
//! - Form DTOs with validation
//! - View models the presentation layer renders

pub mod requests;
pub mod responses;

pub use requests::{CreateClubForm, LogInForm, ProfileForm, SignUpForm};

pub use responses::{
    validation_messages, ApplicantsPage, ClubEntry, ClubListPage, ClubSummary, FeedPage,
    HealthChecks, HealthResponse, MemberEntry, MemberManagementPage, ProfilePage,
    ReadinessResponse, UserSummary,
};
