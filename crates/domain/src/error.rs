// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Level value is below the minimum of 1.
    InvalidLevel(&'static str),
    /// Mission difficulty is outside the supported range.
    InvalidDifficulty {
        /// The invalid difficulty value.
        difficulty: i32,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Board status name is not recognized.
    InvalidBoardStatus(String),
    /// Board status code is not recognized.
    InvalidBoardStatusCode {
        /// The invalid stored code.
        code: i32,
    },
    /// Badge category name is not recognized.
    InvalidBadgeKind(String),
    /// Badge rank must be 1-based.
    InvalidBadgeRank {
        /// The invalid rank value.
        rank: i64,
    },
    /// Badge category requires a sub-type but none was provided.
    MissingBadgeSubType {
        /// The badge category.
        kind: String,
    },
    /// Badge category does not carry a sub-type but one was provided.
    UnexpectedBadgeSubType {
        /// The badge category.
        kind: String,
    },
    /// Artifact type name is not recognized.
    InvalidArtifactType(String),
    /// XP source name is not recognized.
    InvalidXpSource(String),
    /// Prefecture name is not one of the 47 prefectures.
    InvalidPrefecture(String),
    /// Season dates are inconsistent.
    InvalidSeasonDates {
        /// The season slug.
        slug: String,
        /// Description of the inconsistency.
        reason: String,
    },
    /// Season slug is empty or invalid.
    InvalidSeasonSlug(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(msg) => write!(f, "Invalid level: {msg}"),
            Self::InvalidDifficulty { difficulty } => {
                write!(f, "Invalid mission difficulty: {difficulty}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidBoardStatus(name) => write!(f, "Unknown board status: {name}"),
            Self::InvalidBoardStatusCode { code } => {
                write!(f, "Unknown board status code: {code}")
            }
            Self::InvalidBadgeKind(name) => write!(f, "Unknown badge category: {name}"),
            Self::InvalidBadgeRank { rank } => {
                write!(f, "Badge rank must be at least 1, got {rank}")
            }
            Self::MissingBadgeSubType { kind } => {
                write!(f, "Badge category '{kind}' requires a sub-type")
            }
            Self::UnexpectedBadgeSubType { kind } => {
                write!(f, "Badge category '{kind}' does not carry a sub-type")
            }
            Self::InvalidArtifactType(name) => write!(f, "Unknown artifact type: {name}"),
            Self::InvalidXpSource(name) => write!(f, "Unknown XP source: {name}"),
            Self::InvalidPrefecture(name) => write!(f, "Unknown prefecture: {name}"),
            Self::InvalidSeasonDates { slug, reason } => {
                write!(f, "Invalid dates for season '{slug}': {reason}")
            }
            Self::InvalidSeasonSlug(msg) => write!(f, "Invalid season slug: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
