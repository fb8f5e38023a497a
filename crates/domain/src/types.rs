// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of proof attached to a mission achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactType {
    /// No artifact required.
    None,
    /// Free-form text.
    Text,
    /// Uploaded photo URL.
    Image,
    /// Latitude/longitude pair.
    Geolocation,
    /// Referral record: the invitee's lowercased email.
    Referral,
    /// Posting activity record.
    Posting,
}

impl ArtifactType {
    /// Converts this artifact type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::Geolocation => "GEOLOCATION",
            Self::Referral => "REFERRAL",
            Self::Posting => "POSTING",
        }
    }
}

impl FromStr for ArtifactType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Self::None),
            "TEXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            "GEOLOCATION" => Ok(Self::Geolocation),
            "REFERRAL" => Ok(Self::Referral),
            "POSTING" => Ok(Self::Posting),
            _ => Err(DomainError::InvalidArtifactType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of an XP grant in the transaction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum XpSource {
    /// Mission achievement reward.
    MissionCompletion,
    /// Manual bonus or correction.
    Bonus,
    /// Referral reward for the referrer.
    Referral,
}

impl XpSource {
    /// Converts this source to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissionCompletion => "MISSION_COMPLETION",
            Self::Bonus => "BONUS",
            Self::Referral => "REFERRAL",
        }
    }
}

impl FromStr for XpSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MISSION_COMPLETION" => Ok(Self::MissionCompletion),
            "BONUS" => Ok(Self::Bonus),
            "REFERRAL" => Ok(Self::Referral),
            _ => Err(DomainError::InvalidXpSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for XpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_type_round_trip() {
        for artifact_type in [
            ArtifactType::None,
            ArtifactType::Text,
            ArtifactType::Image,
            ArtifactType::Geolocation,
            ArtifactType::Referral,
            ArtifactType::Posting,
        ] {
            assert_eq!(
                artifact_type.as_str().parse::<ArtifactType>().unwrap(),
                artifact_type
            );
        }
    }

    #[test]
    fn test_artifact_type_rejects_unknown() {
        assert!(matches!(
            "VIDEO".parse::<ArtifactType>(),
            Err(DomainError::InvalidArtifactType(_))
        ));
    }

    #[test]
    fn test_xp_source_round_trip() {
        for source in [
            XpSource::MissionCompletion,
            XpSource::Bonus,
            XpSource::Referral,
        ] {
            assert_eq!(source.as_str().parse::<XpSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_xp_source_rejects_unknown() {
        assert!(matches!(
            "PURCHASE".parse::<XpSource>(),
            Err(DomainError::InvalidXpSource(_))
        ));
    }
}
