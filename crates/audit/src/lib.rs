// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use action_board_domain::BoardStatus;

/// Represents the entity performing a status change.
///
/// An actor is any identifiable entity that initiates a transition.
/// For poster boards this is almost always a signed-in volunteer, but
/// system batch jobs also act (e.g. CSV imports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The user ID of the acting entity.
    pub user_id: i64,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new user Actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The acting user's ID
    #[must_use]
    pub fn user(user_id: i64) -> Self {
        Self {
            user_id,
            actor_type: String::from("user"),
        }
    }

    /// Creates a new Actor with an explicit type.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The acting user's ID
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(user_id: i64, actor_type: String) -> Self {
        Self {
            user_id,
            actor_type,
        }
    }
}

/// An immutable record of one poster-board status transition.
///
/// Every successful status change must produce exactly one transition
/// record. Records are immutable once created and capture:
/// - which board changed
/// - who performed the change (actor)
/// - the status before and after the change
/// - an optional free-form note
///
/// The status captured in `previous_status` is the one read at the
/// moment the change was applied, inside the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The board that changed.
    pub board_id: i64,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The status before the change.
    pub previous_status: BoardStatus,
    /// The status after the change.
    pub new_status: BoardStatus,
    /// Optional note entered by the actor.
    pub note: Option<String>,
}

impl StatusTransition {
    /// Creates a new `StatusTransition`.
    ///
    /// Once created, a transition record is immutable.
    ///
    /// # Arguments
    ///
    /// * `board_id` - The board that changed
    /// * `actor` - The actor who initiated the change
    /// * `previous_status` - The status before the change
    /// * `new_status` - The status after the change
    /// * `note` - Optional note
    #[must_use]
    pub const fn new(
        board_id: i64,
        actor: Actor,
        previous_status: BoardStatus,
        new_status: BoardStatus,
        note: Option<String>,
    ) -> Self {
        Self {
            board_id,
            actor,
            previous_status,
            new_status,
            note,
        }
    }

    /// Whether this transition actually changed the status.
    ///
    /// Same-status transitions are recorded too (they carry notes), so
    /// this is informational rather than a validity check.
    #[must_use]
    pub fn is_status_change(&self) -> bool {
        self.previous_status != self.new_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation() {
        let actor: Actor = Actor::new(42, String::from("user"));
        assert_eq!(actor.user_id, 42);
        assert_eq!(actor.actor_type, "user");
    }

    #[test]
    fn test_transition_creation_requires_all_fields() {
        let actor: Actor = Actor::new(42, String::from("user"));
        let transition: StatusTransition = StatusTransition::new(
            7,
            actor.clone(),
            BoardStatus::NotYet,
            BoardStatus::Done,
            Some(String::from("2枚貼りました")),
        );

        assert_eq!(transition.board_id, 7);
        assert_eq!(transition.actor, actor);
        assert_eq!(transition.previous_status, BoardStatus::NotYet);
        assert_eq!(transition.new_status, BoardStatus::Done);
        assert_eq!(transition.note.as_deref(), Some("2枚貼りました"));
    }

    #[test]
    fn test_is_status_change() {
        let actor: Actor = Actor::new(42, String::from("user"));
        let changed: StatusTransition = StatusTransition::new(
            7,
            actor.clone(),
            BoardStatus::Reserved,
            BoardStatus::Done,
            None,
        );
        assert!(changed.is_status_change());

        let unchanged: StatusTransition =
            StatusTransition::new(7, actor, BoardStatus::Done, BoardStatus::Done, None);
        assert!(!unchanged.is_status_change());
    }

    #[test]
    fn test_transition_equality() {
        let make = || {
            StatusTransition::new(
                7,
                Actor::new(42, String::from("user")),
                BoardStatus::NotYet,
                BoardStatus::Reserved,
                None,
            )
        };
        assert_eq!(make(), make());
    }
}
