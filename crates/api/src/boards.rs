// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Poster board operations.

use crate::auth::{AuthenticatedUser, fmt_rfc3339};
use crate::csv_import::parse_boards_csv;
use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::request_response::{
    BoardHistoryEntry, BoardStatusCountsResponse, UpdateBoardStatusRequest,
    UpdateBoardStatusResponse,
};
use action_board_audit::StatusTransition;
use action_board_domain::{BoardStatus, is_prefecture, mask_username};
use action_board_persistence::Persistence;
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;
use tracing::error;

/// Updates a poster board's status.
///
/// The status write and the history append are one transaction in the
/// persistence layer: a failure response means nothing changed.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user` - The signed-in user
/// * `board_id` - The board to update
/// * `request` - The new status and optional note
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `InvalidInput` for unknown status names, `ResourceNotFound`
/// for missing boards, and a generic internal error for database
/// failures.
pub fn update_board_status(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    board_id: i64,
    request: &UpdateBoardStatusRequest,
    now: OffsetDateTime,
) -> ApiResult<UpdateBoardStatusResponse> {
    let new_status: BoardStatus = request.status.parse().map_err(|_| ApiError::InvalidInput {
        field: String::from("status"),
        message: format!("不明なステータスです: {}", request.status),
    })?;

    let now_str: String = fmt_rfc3339(now)?;
    let transition: StatusTransition = persistence
        .update_board_status(
            board_id,
            user.user_id,
            new_status,
            request.note.as_deref(),
            &now_str,
        )
        .map_err(|e| {
            error!(error = %e, board_id, "Board status update failed");
            translate_persistence_error("update_board_status", &e)
        })?;

    Ok(UpdateBoardStatusResponse {
        board_id,
        previous_status: transition.previous_status.as_str().to_string(),
        new_status: transition.new_status.as_str().to_string(),
    })
}

/// Loads a board's status history with masked user names.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `board_id` - The board to read
///
/// # Errors
///
/// Returns `ResourceNotFound` for missing boards and internal errors
/// for database failures.
pub fn board_history(
    persistence: &mut Persistence,
    board_id: i64,
) -> ApiResult<Vec<BoardHistoryEntry>> {
    if persistence
        .get_board(board_id)
        .map_err(|e| {
            error!(error = %e, "Board lookup failed");
            ApiError::Internal {
                message: String::from("board_history failed"),
            }
        })?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Poster board"),
            message: format!("Poster board {board_id} does not exist"),
        });
    }

    let rows = persistence.board_history(board_id).map_err(|e| {
        error!(error = %e, "Board history fetch failed");
        ApiError::Internal {
            message: String::from("board_history failed"),
        }
    })?;

    // One name lookup per distinct actor, then mask for display.
    let mut names: HashMap<i64, String> = HashMap::new();
    let mut entries: Vec<BoardHistoryEntry> = Vec::with_capacity(rows.len());
    for row in rows {
        let masked: String = match names.get(&row.user_id) {
            Some(name) => name.clone(),
            None => {
                let name: String = persistence
                    .get_user_by_id(row.user_id)
                    .ok()
                    .flatten()
                    .map_or_else(String::new, |user| mask_username(&user.name));
                names.insert(row.user_id, name.clone());
                name
            }
        };

        let previous: BoardStatus = BoardStatus::from_code(row.previous_status)
            .map_err(crate::error::translate_domain_error)?;
        let new: BoardStatus = BoardStatus::from_code(row.new_status)
            .map_err(crate::error::translate_domain_error)?;

        entries.push(BoardHistoryEntry {
            user_name: masked,
            previous_status: previous.as_str().to_string(),
            new_status: new.as_str().to_string(),
            note: row.note,
            created_at: row.created_at,
        });
    }

    Ok(entries)
}

/// Counts boards per status within a prefecture.
///
/// # Errors
///
/// Returns `InvalidInput` for unknown prefectures and internal errors
/// for database failures.
pub fn board_status_counts(
    persistence: &mut Persistence,
    prefecture: &str,
) -> ApiResult<BoardStatusCountsResponse> {
    if !is_prefecture(prefecture) {
        return Err(ApiError::InvalidInput {
            field: String::from("prefecture"),
            message: format!("不明な都道府県です: {prefecture}"),
        });
    }

    let counts = persistence.board_status_counts(prefecture).map_err(|e| {
        error!(error = %e, "Board status counts failed");
        ApiError::Internal {
            message: String::from("board_status_counts failed"),
        }
    })?;

    // Every status appears in the response, zero-filled.
    let mut status_counts: BTreeMap<String, i64> = BoardStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();
    let mut total_count: i64 = 0;
    for (code, count) in counts {
        let status: BoardStatus =
            BoardStatus::from_code(code).map_err(crate::error::translate_domain_error)?;
        status_counts.insert(status.as_str().to_string(), count);
        total_count += count;
    }

    Ok(BoardStatusCountsResponse {
        prefecture: prefecture.to_string(),
        total_count,
        status_counts,
    })
}

/// Imports poster boards from CSV content.
///
/// Returns the number of boards inserted.
///
/// # Errors
///
/// Returns `InvalidInput` with the first offending line when parsing
/// fails; nothing is inserted then.
pub fn import_boards_csv(persistence: &mut Persistence, csv_content: &str) -> ApiResult<usize> {
    let boards = parse_boards_csv(csv_content).map_err(|e| ApiError::InvalidInput {
        field: String::from("csv"),
        message: e.to_string(),
    })?;

    persistence.insert_boards(&boards).map_err(|e| {
        error!(error = %e, "Board CSV import failed");
        ApiError::Internal {
            message: String::from("import_boards_csv failed"),
        }
    })
}
