// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Badge categories, display tiers, and assignment validation.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The four badge categories.
///
/// Each ranking snapshot produces badges in exactly one category.
/// `Prefecture` and `Mission` badges are scoped by a sub-type (the
/// prefecture name or mission slug); `Daily` and `All` are global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeKind {
    /// Previous-day ranking.
    Daily,
    /// Overall season ranking.
    All,
    /// Per-prefecture ranking.
    Prefecture,
    /// Per-mission ranking.
    Mission,
}

impl BadgeKind {
    /// All badge categories in recomputation order.
    pub const ALL_KINDS: [Self; 4] = [Self::All, Self::Daily, Self::Prefecture, Self::Mission];

    /// Converts this category to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::All => "ALL",
            Self::Prefecture => "PREFECTURE",
            Self::Mission => "MISSION",
        }
    }

    /// Whether badges of this category carry a sub-type.
    #[must_use]
    pub const fn requires_sub_type(&self) -> bool {
        matches!(self, Self::Prefecture | Self::Mission)
    }
}

impl FromStr for BadgeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(Self::Daily),
            "ALL" => Ok(Self::All),
            "PREFECTURE" => Ok(Self::Prefecture),
            "MISSION" => Ok(Self::Mission),
            _ => Err(DomainError::InvalidBadgeKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display tier of a badge, derived from its rank.
///
/// Used for presentation only and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTier {
    /// Rank 1-10.
    Gold,
    /// Rank 11-50.
    Silver,
    /// Rank 51 and below.
    Bronze,
}

impl BadgeTier {
    /// Maps a 1-based rank to its display tier.
    #[must_use]
    pub const fn for_rank(rank: u32) -> Self {
        if rank <= 10 {
            Self::Gold
        } else if rank <= 50 {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Returns the emoji used when rendering this tier.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }
}

/// Per-category rank cutoffs for badge assignment.
///
/// Only entrants at or above the cutoff for their category receive a
/// badge during recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCutoffs {
    /// Cutoff for the overall ranking.
    pub all: u32,
    /// Cutoff for the daily ranking.
    pub daily: u32,
    /// Cutoff for each per-prefecture ranking.
    pub prefecture: u32,
    /// Cutoff for each per-mission ranking.
    pub mission: u32,
}

impl Default for BadgeCutoffs {
    fn default() -> Self {
        Self {
            all: 100,
            daily: 100,
            prefecture: 100,
            mission: 100,
        }
    }
}

impl BadgeCutoffs {
    /// Returns the cutoff for a badge category.
    #[must_use]
    pub const fn cutoff_for(&self, kind: BadgeKind) -> u32 {
        match kind {
            BadgeKind::All => self.all,
            BadgeKind::Daily => self.daily,
            BadgeKind::Prefecture => self.prefecture,
            BadgeKind::Mission => self.mission,
        }
    }
}

/// A single badge to assign: one user, one category, one rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeAssignment {
    /// The user receiving the badge.
    pub user_id: i64,
    /// The badge category.
    pub kind: BadgeKind,
    /// The category sub-type (prefecture name or mission slug).
    pub sub_type: Option<String>,
    /// The 1-based rank within the snapshot.
    pub rank: u32,
}

impl BadgeAssignment {
    /// Validates the sub-type rules and rank for this assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the rank is 0, if a scoped category is
    /// missing its sub-type, or if a global category carries one.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rank < 1 {
            return Err(DomainError::InvalidBadgeRank {
                rank: i64::from(self.rank),
            });
        }
        if self.kind.requires_sub_type() && self.sub_type.is_none() {
            return Err(DomainError::MissingBadgeSubType {
                kind: self.kind.as_str().to_string(),
            });
        }
        if !self.kind.requires_sub_type() && self.sub_type.is_some() {
            return Err(DomainError::UnexpectedBadgeSubType {
                kind: self.kind.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Returns the display tier for this assignment's rank.
    #[must_use]
    pub const fn tier(&self) -> BadgeTier {
        BadgeTier::for_rank(self.rank)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_round_trip() {
        for kind in BadgeKind::ALL_KINDS {
            assert_eq!(kind.as_str().parse::<BadgeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        assert!(matches!(
            "WEEKLY".parse::<BadgeKind>(),
            Err(DomainError::InvalidBadgeKind(_))
        ));
    }

    #[test]
    fn test_sub_type_requirements() {
        assert!(!BadgeKind::Daily.requires_sub_type());
        assert!(!BadgeKind::All.requires_sub_type());
        assert!(BadgeKind::Prefecture.requires_sub_type());
        assert!(BadgeKind::Mission.requires_sub_type());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(BadgeTier::for_rank(1), BadgeTier::Gold);
        assert_eq!(BadgeTier::for_rank(10), BadgeTier::Gold);
        assert_eq!(BadgeTier::for_rank(11), BadgeTier::Silver);
        assert_eq!(BadgeTier::for_rank(50), BadgeTier::Silver);
        assert_eq!(BadgeTier::for_rank(51), BadgeTier::Bronze);
        assert_eq!(BadgeTier::for_rank(100), BadgeTier::Bronze);
    }

    #[test]
    fn test_default_cutoffs() {
        let cutoffs: BadgeCutoffs = BadgeCutoffs::default();
        for kind in BadgeKind::ALL_KINDS {
            assert_eq!(cutoffs.cutoff_for(kind), 100);
        }
    }

    #[test]
    fn test_assignment_validation() {
        let valid: BadgeAssignment = BadgeAssignment {
            user_id: 1,
            kind: BadgeKind::Prefecture,
            sub_type: Some("東京都".to_string()),
            rank: 3,
        };
        assert!(valid.validate().is_ok());

        let missing_sub_type: BadgeAssignment = BadgeAssignment {
            user_id: 1,
            kind: BadgeKind::Mission,
            sub_type: None,
            rank: 3,
        };
        assert!(matches!(
            missing_sub_type.validate(),
            Err(DomainError::MissingBadgeSubType { .. })
        ));

        let unexpected_sub_type: BadgeAssignment = BadgeAssignment {
            user_id: 1,
            kind: BadgeKind::All,
            sub_type: Some("東京都".to_string()),
            rank: 3,
        };
        assert!(matches!(
            unexpected_sub_type.validate(),
            Err(DomainError::UnexpectedBadgeSubType { .. })
        ));

        let zero_rank: BadgeAssignment = BadgeAssignment {
            user_id: 1,
            kind: BadgeKind::All,
            sub_type: None,
            rank: 0,
        };
        assert!(matches!(
            zero_rank.validate(),
            Err(DomainError::InvalidBadgeRank { .. })
        ));
    }
}
