// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a poster board.
///
/// The stored representation is the numeric code; the string form is
/// used on the wire. There is no restricted transition graph: any status
/// may move to any other status. The contract of a status update is the
/// atomicity of the (status write, history append) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    /// No poster placed yet.
    #[default]
    NotYet,
    /// Poster placed.
    Done,
    /// A problem was reported at the board.
    Error,
    /// A volunteer reserved the board.
    Reserved,
    /// Placement reported but awaiting confirmation.
    NeedsConfirmation,
    /// Problem being worked on.
    ErrorInProgress,
    /// Board no longer exists.
    Deleted,
    /// Placement confirmed by a second volunteer.
    ConfirmedPosted,
}

impl BoardStatus {
    /// All statuses in stored-code order.
    pub const ALL: [Self; 8] = [
        Self::NotYet,
        Self::Done,
        Self::Error,
        Self::Reserved,
        Self::NeedsConfirmation,
        Self::ErrorInProgress,
        Self::Deleted,
        Self::ConfirmedPosted,
    ];

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYet => "not_yet",
            Self::Done => "done",
            Self::Error => "error",
            Self::Reserved => "reserved",
            Self::NeedsConfirmation => "needs_confirmation",
            Self::ErrorInProgress => "error_in_progress",
            Self::Deleted => "deleted",
            Self::ConfirmedPosted => "confirmed_posted",
        }
    }

    /// Returns the numeric code stored in the database.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotYet => 0,
            Self::Done => 1,
            Self::Error => 2,
            Self::Reserved => 3,
            Self::NeedsConfirmation => 4,
            Self::ErrorInProgress => 5,
            Self::Deleted => 6,
            Self::ConfirmedPosted => 7,
        }
    }

    /// Resolves a stored numeric code back to a status.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not one of the known statuses.
    pub const fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::NotYet),
            1 => Ok(Self::Done),
            2 => Ok(Self::Error),
            3 => Ok(Self::Reserved),
            4 => Ok(Self::NeedsConfirmation),
            5 => Ok(Self::ErrorInProgress),
            6 => Ok(Self::Deleted),
            7 => Ok(Self::ConfirmedPosted),
            _ => Err(DomainError::InvalidBoardStatusCode { code }),
        }
    }
}

impl FromStr for BoardStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_yet" => Ok(Self::NotYet),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            "reserved" => Ok(Self::Reserved),
            "needs_confirmation" => Ok(Self::NeedsConfirmation),
            "error_in_progress" => Ok(Self::ErrorInProgress),
            "deleted" => Ok(Self::Deleted),
            "confirmed_posted" => Ok(Self::ConfirmedPosted),
            _ => Err(DomainError::InvalidBoardStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(BoardStatus::NotYet.code(), 0);
        assert_eq!(BoardStatus::Done.code(), 1);
        assert_eq!(BoardStatus::Error.code(), 2);
        assert_eq!(BoardStatus::Reserved.code(), 3);
        assert_eq!(BoardStatus::NeedsConfirmation.code(), 4);
        assert_eq!(BoardStatus::ErrorInProgress.code(), 5);
        assert_eq!(BoardStatus::Deleted.code(), 6);
        assert_eq!(BoardStatus::ConfirmedPosted.code(), 7);
    }

    #[test]
    fn test_code_round_trip() {
        for status in BoardStatus::ALL {
            assert_eq!(BoardStatus::from_code(status.code()).unwrap(), status);
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(
            BoardStatus::from_code(8),
            Err(DomainError::InvalidBoardStatusCode { code: 8 })
        );
        assert_eq!(
            BoardStatus::from_code(-1),
            Err(DomainError::InvalidBoardStatusCode { code: -1 })
        );
    }

    #[test]
    fn test_string_round_trip() {
        for status in BoardStatus::ALL {
            assert_eq!(status.as_str().parse::<BoardStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_name() {
        assert!(matches!(
            "posted".parse::<BoardStatus>(),
            Err(DomainError::InvalidBoardStatus(_))
        ));
    }

    #[test]
    fn test_default_is_not_yet() {
        assert_eq!(BoardStatus::default(), BoardStatus::NotYet);
    }
}
