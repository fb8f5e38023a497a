// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User level views.

use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::request_response::LevelView;
use action_board_domain::{calculate_level, level_progress, xp_to_next_level};
use action_board_persistence::Persistence;
use tracing::error;

/// Builds the display view for a cumulative XP value.
#[must_use]
pub(crate) fn level_view_for_xp(xp: i64) -> LevelView {
    LevelView {
        xp,
        level: calculate_level(xp),
        xp_to_next_level: xp_to_next_level(xp),
        progress: level_progress(xp),
        rank: None,
    }
}

/// Returns a user's level view for the active season.
///
/// Users without a level row read as fresh level-1 users.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user_id` - The user to read
///
/// # Errors
///
/// Returns an error if the user does not exist or the reads fail.
pub fn get_user_level_view(persistence: &mut Persistence, user_id: i64) -> ApiResult<LevelView> {
    if persistence
        .get_user_by_id(user_id)
        .map_err(|e| {
            error!(error = %e, "User lookup failed");
            ApiError::Internal {
                message: String::from("get_user_level failed"),
            }
        })?
        .filter(|user| !user.is_deleted())
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        });
    }

    let season = persistence
        .get_active_season()
        .map_err(|e| translate_persistence_error("get_user_level", &e))?;

    let xp: i64 = persistence
        .get_user_level(user_id, season.season_id)
        .map_err(|e| {
            error!(error = %e, "Level lookup failed");
            ApiError::Internal {
                message: String::from("get_user_level failed"),
            }
        })?
        .map_or(0, |row| row.xp);

    let rank: Option<i64> = persistence
        .user_rank(user_id, season.season_id)
        .map_err(|e| {
            error!(error = %e, "Rank lookup failed");
            ApiError::Internal {
                message: String::from("get_user_level failed"),
            }
        })?;

    let mut view: LevelView = level_view_for_xp(xp);
    view.rank = rank;
    Ok(view)
}

/// Loads a user's XP ledger, newest entries first.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user_id` - The user to read
/// * `limit` - Maximum number of entries
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn get_user_xp_history(
    persistence: &mut Persistence,
    user_id: i64,
    limit: i64,
) -> ApiResult<Vec<action_board_persistence::XpTransactionData>> {
    persistence.xp_history(user_id, limit).map_err(|e| {
        error!(error = %e, "XP history fetch failed");
        ApiError::Internal {
            message: String::from("get_user_xp_history failed"),
        }
    })
}
