//! Authentication service
//!
//! Handles sign-up, log-in and turning a session cookie into a [`Caller`].

use club_common::auth::{validate_password_strength, SessionToken};
use club_common::AppError;
use club_core::entities::{NewUser, User};
use club_core::value_objects::ChessExperienceLevel;
use club_core::{Caller, DomainError};
use tracing::{debug, info, instrument, warn};

use crate::dto::{LogInForm, SignUpForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Where a successful log-in lands when no usable `next` was given
pub const DEFAULT_LOGIN_REDIRECT: &str = "/profile/";

/// A user together with a freshly issued session
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub session: SessionToken,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn sign_up(&self, form: SignUpForm) -> ServiceResult<SignedIn> {
        validate_password_strength(&form.new_password)?;

        let level = ChessExperienceLevel::try_from(form.chess_experience_level)?;

        if self.ctx.user_repo().username_exists(&form.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&form.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&form.new_password)?;

        let new_user = NewUser {
            username: form.username,
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
            bio: form.bio,
            chess_experience_level: level,
        };
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User signed up");

        let session = self.ctx.session_service().issue(user.id)?;
        Ok(SignedIn { user, session })
    }

    /// Check credentials and issue a session
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn log_in(&self, form: &LogInForm) -> ServiceResult<SignedIn> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&form.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&form.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in");

        let session = self.ctx.session_service().issue(user.id)?;
        Ok(SignedIn { user, session })
    }

    /// Resolve the session cookie value. Anything unusable is anonymous.
    pub fn caller_from_session(&self, token: Option<&str>) -> Caller {
        let Some(token) = token else {
            return Caller::Anonymous;
        };

        match self.ctx.session_service().user_id(token) {
            Ok(user_id) => Caller::Authenticated(user_id),
            Err(e) => {
                debug!(error = %e, "Ignoring unusable session cookie");
                Caller::Anonymous
            }
        }
    }
}

/// Pick the post-login destination: `next` when it is a local path,
/// otherwise [`DEFAULT_LOGIN_REDIRECT`]
pub fn login_redirect_target(next: Option<&str>) -> String {
    match next {
        Some(path) if is_local_path(path) => path.to_string(),
        _ => DEFAULT_LOGIN_REDIRECT.to_string(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
