// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Poster board query operations.

use crate::data_models::{BoardStatusHistoryData, PosterBoardData};
use crate::diesel_schema::{poster_board_status_history, poster_boards};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Look up a poster board by ID.
#[allow(dead_code)]
pub fn get_board(
    conn: &mut _,
    board_id: i64,
) -> Result<Option<PosterBoardData>, PersistenceError> {
    poster_boards::table
        .filter(poster_boards::board_id.eq(board_id))
        .first::<PosterBoardData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_board: {e}")))
}

}

backend_fn! {

/// List boards in a prefecture.
#[allow(dead_code)]
pub fn list_boards_by_prefecture(
    conn: &mut _,
    prefecture: &str,
) -> Result<Vec<PosterBoardData>, PersistenceError> {
    poster_boards::table
        .filter(poster_boards::prefecture.eq(prefecture))
        .order(poster_boards::board_id.asc())
        .load::<PosterBoardData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_boards_by_prefecture: {e}")))
}

}

backend_fn! {

/// Load the status history of a board, newest change first.
#[allow(dead_code)]
pub fn board_history(
    conn: &mut _,
    board_id: i64,
) -> Result<Vec<BoardStatusHistoryData>, PersistenceError> {
    poster_board_status_history::table
        .filter(poster_board_status_history::board_id.eq(board_id))
        .order(poster_board_status_history::history_id.desc())
        .load::<BoardStatusHistoryData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("board_history: {e}")))
}

}

backend_fn! {

/// Count boards per status code within a prefecture.
#[allow(dead_code)]
pub fn board_status_counts(
    conn: &mut _,
    prefecture: &str,
) -> Result<Vec<(i32, i64)>, PersistenceError> {
    poster_boards::table
        .filter(poster_boards::prefecture.eq(prefecture))
        .group_by(poster_boards::status)
        .select((poster_boards::status, diesel::dsl::count_star()))
        .load::<(i32, i64)>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("board_status_counts: {e}")))
}

}
