//! Club access rules
//!
//! The guard is a pure function of the caller's stored tag in a club and the
//! minimum tag an action requires. Looking the tag up is the caller's job.

use serde::Serialize;
use std::fmt;

use crate::value_objects::{RoleTag, UserId};

/// Identity of whoever issued a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

impl Caller {
    #[inline]
    pub fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    #[inline]
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    NotAuthenticated,
    NotAMember,
    Banned,
    InsufficientRole,
}

impl DenialReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::Banned => "BANNED",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Carries the tag that granted access
    Allowed(RoleTag),
    Denied(DenialReason),
}

impl AccessDecision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// Convert into a `Result`, keeping the granting tag
    pub fn into_result(self) -> Result<RoleTag, DenialReason> {
        match self {
            Self::Allowed(tag) => Ok(tag),
            Self::Denied(reason) => Err(reason),
        }
    }
}

/// Decide whether a stored tag meets `threshold`.
///
/// No row means `NotAMember`. `Banned` is reported before any rank
/// comparison, so it denies even at the lowest threshold.
pub fn evaluate(current: Option<RoleTag>, threshold: RoleTag) -> AccessDecision {
    let Some(tag) = current else {
        return AccessDecision::Denied(DenialReason::NotAMember);
    };
    if tag.is_banned() {
        return AccessDecision::Denied(DenialReason::Banned);
    }
    if tag.satisfies(threshold) {
        AccessDecision::Allowed(tag)
    } else {
        AccessDecision::Denied(DenialReason::InsufficientRole)
    }
}

/// Same as [`evaluate`] but denies anonymous callers first
pub fn evaluate_caller(
    caller: Caller,
    current: Option<RoleTag>,
    threshold: RoleTag,
) -> AccessDecision {
    if !caller.is_authenticated() {
        return AccessDecision::Denied(DenialReason::NotAuthenticated);
    }
    evaluate(current, threshold)
}
