// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Poster board mutation operations.
//!
//! A status update is two writes (the new status and the history
//! append) inside a single transaction. The failure contract is
//! all-or-nothing: a failed update leaves neither a new status nor a
//! dangling history row, and the history never diverges from the
//! status column.

use crate::data_models::{NewBoardStatusHistory, NewPosterBoard};
use crate::diesel_schema::{poster_board_status_history, poster_boards};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

/// Result of a poster board status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStatusUpdate {
    /// The status read at the moment of the update.
    pub previous_status: i32,
    /// The status written.
    pub new_status: i32,
}

backend_fn! {

/// Bulk-insert poster boards (CSV import).
///
/// Returns the number of boards inserted.
#[allow(dead_code)]
pub fn insert_boards(
    conn: &mut _,
    boards: &[NewPosterBoard],
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for batch in crate::chunk::chunk(boards, crate::chunk::DEFAULT_CHUNK_SIZE) {
        inserted += diesel::insert_into(poster_boards::table)
            .values(&batch)
            .execute(conn)?;
    }
    Ok(inserted)
}

}

backend_fn! {

/// Update a board's status and append the matching history row.
///
/// Reads the current status, writes the new one, and appends a history
/// row capturing the previous status, the acting user, and an optional
/// note, all in one transaction. A nonexistent board fails with
/// `BoardNotFound` before any write.
#[allow(dead_code)]
#[allow(clippy::too_many_arguments)]
pub fn update_board_status(
    conn: &mut _,
    board_id: i64,
    user_id: i64,
    new_status: i32,
    note: Option<&str>,
    now: &str,
) -> Result<BoardStatusUpdate, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let previous_status: i32 = poster_boards::table
            .filter(poster_boards::board_id.eq(board_id))
            .select(poster_boards::status)
            .first::<i32>(conn)
            .optional()?
            .ok_or(PersistenceError::BoardNotFound(board_id))?;

        diesel::update(poster_boards::table.filter(poster_boards::board_id.eq(board_id)))
            .set(poster_boards::status.eq(new_status))
            .execute(conn)?;

        let history = NewBoardStatusHistory {
            board_id,
            user_id,
            previous_status,
            new_status,
            note: note.map(ToString::to_string),
            created_at: now.to_string(),
        };
        diesel::insert_into(poster_board_status_history::table)
            .values(&history)
            .execute(conn)?;

        Ok(BoardStatusUpdate {
            previous_status,
            new_status,
        })
    })
}

}
