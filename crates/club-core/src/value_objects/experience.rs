//! Chess experience level chosen at sign-up

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Self-reported chess experience (stored as 1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum ChessExperienceLevel {
    #[default]
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl ChessExperienceLevel {
    /// Numeric level as stored
    #[must_use]
    pub const fn level(self) -> i16 {
        match self {
            Self::Beginner => 1,
            Self::Novice => 2,
            Self::Intermediate => 3,
            Self::Advanced => 4,
            Self::Expert => 5,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Novice => "Novice",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl TryFrom<i16> for ChessExperienceLevel {
    type Error = DomainError;

    fn try_from(level: i16) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Beginner),
            2 => Ok(Self::Novice),
            3 => Ok(Self::Intermediate),
            4 => Ok(Self::Advanced),
            5 => Ok(Self::Expert),
            other => Err(DomainError::InvalidExperienceLevel(other)),
        }
    }
}

impl From<ChessExperienceLevel> for i16 {
    fn from(level: ChessExperienceLevel) -> Self {
        level.level()
    }
}

impl fmt::Display for ChessExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
