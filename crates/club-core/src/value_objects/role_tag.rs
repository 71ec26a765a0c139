//! Club role tags
//!
//! A user holds at most one tag per club. The promotion chain is
//! `Applicant < Member < Officer < Owner`; `Banned` sits outside it and is
//! not comparable with any chain tag.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Status of a user within one club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    #[serde(rename = "APP")]
    Applicant,
    #[serde(rename = "MEM")]
    Member,
    #[serde(rename = "OFF")]
    Officer,
    #[serde(rename = "OWN")]
    Owner,
    #[serde(rename = "BAN")]
    Banned,
}

impl RoleTag {
    /// Tags that count as active membership
    pub const ACTIVE: [RoleTag; 3] = [RoleTag::Member, RoleTag::Officer, RoleTag::Owner];

    /// Storage code for the tag
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Applicant => "APP",
            Self::Member => "MEM",
            Self::Officer => "OFF",
            Self::Owner => "OWN",
            Self::Banned => "BAN",
        }
    }

    /// Parse a storage code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "APP" => Some(Self::Applicant),
            "MEM" => Some(Self::Member),
            "OFF" => Some(Self::Officer),
            "OWN" => Some(Self::Owner),
            "BAN" => Some(Self::Banned),
            _ => None,
        }
    }

    /// Position on the promotion chain, `None` for `Banned`
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Applicant => Some(0),
            Self::Member => Some(1),
            Self::Officer => Some(2),
            Self::Owner => Some(3),
            Self::Banned => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_banned(self) -> bool {
        matches!(self, Self::Banned)
    }

    /// Member, officer or owner
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Member | Self::Officer | Self::Owner)
    }

    /// Check whether this tag meets a minimum threshold.
    ///
    /// `Banned` never meets any threshold, and `Banned` as a threshold is met by nothing.
    #[must_use]
    pub fn satisfies(self, threshold: RoleTag) -> bool {
        matches!(
            self.partial_cmp(&threshold),
            Some(Ordering::Greater | Ordering::Equal)
        ) && !self.is_banned()
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applicant => "Applicant",
            Self::Member => "Member",
            Self::Officer => "Officer",
            Self::Owner => "Owner",
            Self::Banned => "Banned",
        }
    }
}

impl PartialOrd for RoleTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RoleTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| DomainError::InvalidRoleTag(s.to_string()))
    }
}
