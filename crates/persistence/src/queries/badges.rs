// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Badge query operations.

use crate::data_models::UserBadgeData;
use crate::diesel_schema::user_badges;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Load a user's badges for one season, grouped by category then rank.
#[allow(dead_code)]
pub fn get_user_badges(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
) -> Result<Vec<UserBadgeData>, PersistenceError> {
    user_badges::table
        .filter(user_badges::user_id.eq(user_id))
        .filter(user_badges::season_id.eq(season_id))
        .order((user_badges::badge_type.asc(), user_badges::rank.asc()))
        .load::<UserBadgeData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_badges: {e}")))
}

}

backend_fn! {

/// Load a user's badges the owner has not yet been notified about.
#[allow(dead_code)]
pub fn get_unnotified_badges(
    conn: &mut _,
    user_id: i64,
) -> Result<Vec<UserBadgeData>, PersistenceError> {
    user_badges::table
        .filter(user_badges::user_id.eq(user_id))
        .filter(user_badges::is_notified.eq(0))
        .order(user_badges::updated_at.desc())
        .load::<UserBadgeData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_unnotified_badges: {e}")))
}

}
