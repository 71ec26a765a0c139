//! View models handed to the presentation layer

use chrono::{DateTime, Utc};
use club_core::entities::{Club, ClubMember, User, UserClubRole};
use club_core::value_objects::{ClubId, RoleTag, UserId};
use serde::Serialize;
use validator::ValidationErrors;

// ============================================================================
// Users
// ============================================================================

/// Public user fields shown on listings and profiles
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub chess_experience_level: i16,
    pub chess_experience: &'static str,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            chess_experience_level: user.chess_experience_level.level(),
            chess_experience: user.chess_experience_level.label(),
        }
    }
}

/// A user listed with their tag in one club
#[derive(Debug, Clone, Serialize)]
pub struct MemberEntry {
    pub user: UserSummary,
    pub role: RoleTag,
    pub role_label: &'static str,
}

impl From<&ClubMember> for MemberEntry {
    fn from(member: &ClubMember) -> Self {
        Self {
            user: UserSummary::from(&member.user),
            role: member.role,
            role_label: member.role.label(),
        }
    }
}

// ============================================================================
// Clubs
// ============================================================================

/// Club fields for listings
#[derive(Debug, Clone, Serialize)]
pub struct ClubSummary {
    pub id: ClubId,
    pub name: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            location: club.location.clone(),
            description: club.description.clone(),
            created_at: club.created_at,
        }
    }
}

/// A club together with the viewer's tag in it (if any)
#[derive(Debug, Clone, Serialize)]
pub struct ClubEntry {
    pub club: ClubSummary,
    pub role: Option<RoleTag>,
}

impl From<&UserClubRole> for ClubEntry {
    fn from(entry: &UserClubRole) -> Self {
        Self {
            club: ClubSummary::from(&entry.club),
            role: Some(entry.role),
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// `/profile/`
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub user: UserSummary,
    pub memberships: Vec<ClubEntry>,
}

/// `/feed/`
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub user: UserSummary,
    pub clubs: Vec<ClubEntry>,
}

/// `/clubs/`
#[derive(Debug, Clone, Serialize)]
pub struct ClubListPage {
    pub clubs: Vec<ClubEntry>,
}

/// `/applicants/<club>/`
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantsPage {
    pub club: ClubSummary,
    pub applicants: Vec<MemberEntry>,
}

/// `/club/<club>/member_management/`
///
/// The emptiness flags are precomputed for the template.
#[derive(Debug, Clone, Serialize)]
pub struct MemberManagementPage {
    pub club: ClubSummary,
    pub viewer_role: RoleTag,
    pub members: Vec<MemberEntry>,
    pub banned: Vec<MemberEntry>,
    pub member_is_empty: bool,
    pub banned_is_empty: bool,
}

impl MemberManagementPage {
    pub fn new(
        club: &Club,
        viewer_role: RoleTag,
        members: Vec<MemberEntry>,
        banned: Vec<MemberEntry>,
    ) -> Self {
        Self {
            club: ClubSummary::from(club),
            viewer_role,
            member_is_empty: members.is_empty(),
            banned_is_empty: banned.is_empty(),
            members,
            banned,
        }
    }
}

/// Field messages from a failed form validation, sorted by field name
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect()
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
