//! # club-service
//!
//! Application layer containing the access guard, membership services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    login_redirect_target, AccessGuard, AuthService, Authorized, ClubService, MembershipService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SignedIn,
    TransitionOutcome, UserService, DEFAULT_LOGIN_REDIRECT,
};
