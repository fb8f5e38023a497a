// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested user was not found.
    UserNotFound(i64),
    /// The requested session was not found.
    SessionNotFound(String),
    /// Session has expired.
    SessionExpired(String),
    /// No season is currently active.
    NoActiveSeason,
    /// The requested season was not found.
    SeasonNotFound(String),
    /// The requested mission was not found.
    MissionNotFound(String),
    /// The requested poster board was not found.
    BoardNotFound(i64),
    /// The requested achievement was not found.
    AchievementNotFound(i64),
    /// The achievement belongs to a different user.
    NotAchievementOwner {
        /// The achievement in question.
        achievement_id: i64,
        /// The user attempting the operation.
        user_id: i64,
    },
    /// A domain invariant was violated while mapping stored data.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UserNotFound(id) => write!(f, "User not found: {id}"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::SessionExpired(msg) => write!(f, "Session expired: {msg}"),
            Self::NoActiveSeason => write!(f, "No season is currently active"),
            Self::SeasonNotFound(slug) => write!(f, "Season not found: {slug}"),
            Self::MissionNotFound(slug) => write!(f, "Mission not found: {slug}"),
            Self::BoardNotFound(id) => write!(f, "Poster board not found: {id}"),
            Self::AchievementNotFound(id) => write!(f, "Achievement not found: {id}"),
            Self::NotAchievementOwner {
                achievement_id,
                user_id,
            } => {
                write!(
                    f,
                    "Achievement {achievement_id} is not owned by user {user_id}"
                )
            }
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<action_board_domain::DomainError> for PersistenceError {
    fn from(err: action_board_domain::DomainError) -> Self {
        Self::InvalidStoredValue(err.to_string())
    }
}
