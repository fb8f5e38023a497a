// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Validation failures carry user-facing messages. Persistence
//! failures are logged where they occur and surfaced as generic
//! internal errors; the original detail never crosses the public
//! contract.

use crate::password_policy::PasswordPolicyError;
use action_board_domain::DomainError;
use action_board_persistence::PersistenceError;

/// Convenience alias for API results.
pub type ApiResult<T> = Result<T, ApiError>;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller has no valid session; mutations short-circuit.
    Unauthorized {
        /// The action that was attempted.
        action: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred. The message is generic; details
    /// stay in the server logs.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action } => {
                write!(f, "Unauthorized: '{action}' requires a signed-in user")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidLevel(msg) => ApiError::InvalidInput {
            field: String::from("level"),
            message: msg.to_string(),
        },
        DomainError::InvalidDifficulty { difficulty } => ApiError::InvalidInput {
            field: String::from("difficulty"),
            message: format!("Unsupported difficulty: {difficulty}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{date_string}' is not a valid date: {error}"),
        },
        DomainError::InvalidBoardStatus(name) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown board status: {name}"),
        },
        DomainError::InvalidBoardStatusCode { code } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown board status code: {code}"),
        },
        DomainError::InvalidBadgeKind(name) => ApiError::InvalidInput {
            field: String::from("badge_type"),
            message: format!("Unknown badge category: {name}"),
        },
        DomainError::InvalidBadgeRank { rank } => ApiError::InvalidInput {
            field: String::from("rank"),
            message: format!("Rank must be at least 1, got {rank}"),
        },
        DomainError::MissingBadgeSubType { kind } => ApiError::DomainRuleViolation {
            rule: String::from("badge_sub_type"),
            message: format!("Badge category '{kind}' requires a sub-type"),
        },
        DomainError::UnexpectedBadgeSubType { kind } => ApiError::DomainRuleViolation {
            rule: String::from("badge_sub_type"),
            message: format!("Badge category '{kind}' does not carry a sub-type"),
        },
        DomainError::InvalidArtifactType(name) => ApiError::InvalidInput {
            field: String::from("artifact_type"),
            message: format!("Unknown artifact type: {name}"),
        },
        DomainError::InvalidXpSource(name) => ApiError::InvalidInput {
            field: String::from("source_type"),
            message: format!("Unknown XP source: {name}"),
        },
        DomainError::InvalidPrefecture(name) => ApiError::InvalidInput {
            field: String::from("prefecture"),
            message: format!("Unknown prefecture: {name}"),
        },
        DomainError::InvalidSeasonDates { slug, reason } => ApiError::InvalidInput {
            field: String::from("season"),
            message: format!("Invalid dates for season '{slug}': {reason}"),
        },
        DomainError::InvalidSeasonSlug(msg) => ApiError::InvalidInput {
            field: String::from("season_slug"),
            message: msg,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found conditions map to typed results; everything else is
/// logged by the caller and becomes a generic internal failure so
/// database details never reach the client.
#[must_use]
pub fn translate_persistence_error(operation: &str, err: &PersistenceError) -> ApiError {
    match err {
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::BoardNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Poster board"),
            message: format!("Poster board {id} does not exist"),
        },
        PersistenceError::AchievementNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Achievement"),
            message: format!("Achievement {id} does not exist"),
        },
        PersistenceError::MissionNotFound(slug) => ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message: format!("Mission {slug} does not exist"),
        },
        PersistenceError::SeasonNotFound(slug) => ApiError::ResourceNotFound {
            resource_type: String::from("Season"),
            message: format!("Season {slug} does not exist"),
        },
        PersistenceError::NoActiveSeason => ApiError::ResourceNotFound {
            resource_type: String::from("Season"),
            message: String::from("No season is currently active"),
        },
        PersistenceError::NotAchievementOwner { .. } => ApiError::Unauthorized {
            action: String::from("cancel_achievement"),
        },
        PersistenceError::SessionNotFound(_) | PersistenceError::SessionExpired(_) => {
            ApiError::Unauthorized {
                action: operation.to_string(),
            }
        }
        _ => ApiError::Internal {
            message: format!("{operation} failed"),
        },
    }
}
