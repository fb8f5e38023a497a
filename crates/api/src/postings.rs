// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Posting (leafleting) event recording.

use crate::auth::{AuthenticatedUser, fmt_rfc3339};
use crate::error::{ApiError, ApiResult, translate_persistence_error};
use action_board_persistence::{NewPostingEvent, Persistence};
use time::OffsetDateTime;
use tracing::error;

/// Records a posting event for the signed-in user.
///
/// Returns the generated event ID.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user` - The signed-in user
/// * `posted_count` - Number of items posted (must be positive)
/// * `coordinates` - Optional (latitude, longitude) of the activity
/// * `note` - Optional free-form note
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `InvalidInput` for non-positive counts and internal errors
/// for database failures.
pub fn record_posting(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    posted_count: i32,
    coordinates: Option<(f64, f64)>,
    note: Option<&str>,
    now: OffsetDateTime,
) -> ApiResult<i64> {
    if posted_count <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("posted_count"),
            message: String::from("配布枚数は1以上で入力してください"),
        });
    }

    let season = persistence
        .get_active_season()
        .map_err(|e| translate_persistence_error("record_posting", &e))?;
    let now_str: String = fmt_rfc3339(now)?;

    persistence
        .record_posting_event(&NewPostingEvent {
            user_id: user.user_id,
            season_id: season.season_id,
            posted_count,
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, long)| long),
            note: note.map(ToString::to_string),
            created_at: now_str,
        })
        .map_err(|e| {
            error!(error = %e, "Posting event insert failed");
            ApiError::Internal {
                message: String::from("record_posting failed"),
            }
        })
}
