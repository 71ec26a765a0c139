//! Business logic services
//!
//! This module contains the access guard and the services that orchestrate
//! ledger reads and transitions for each request.

pub mod auth;
pub mod club;
pub mod context;
pub mod error;
pub mod guard;
pub mod membership;
pub mod user;

// Re-export all services for convenience
pub use auth::{login_redirect_target, AuthService, SignedIn, DEFAULT_LOGIN_REDIRECT};
pub use club::ClubService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use guard::{AccessGuard, Authorized};
pub use membership::{MembershipService, TransitionOutcome};
pub use user::UserService;
