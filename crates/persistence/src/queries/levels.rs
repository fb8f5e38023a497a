// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User level and XP ledger query operations.

use crate::data_models::{UserLevelData, XpTransactionData};
use crate::diesel_schema::{user_levels, xp_transactions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Look up a user's level row for a season.
#[allow(dead_code)]
pub fn get_user_level(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
) -> Result<Option<UserLevelData>, PersistenceError> {
    user_levels::table
        .filter(user_levels::user_id.eq(user_id))
        .filter(user_levels::season_id.eq(season_id))
        .first::<UserLevelData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_level: {e}")))
}

}

backend_fn! {

/// Compute a user's 1-based rank in a season's overall ranking.
///
/// Rank = 1 + number of users with strictly more XP. Users with no
/// level row have no rank.
#[allow(dead_code)]
pub fn user_rank(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let own_xp: Option<i64> = user_levels::table
        .filter(user_levels::user_id.eq(user_id))
        .filter(user_levels::season_id.eq(season_id))
        .select(user_levels::xp)
        .first::<i64>(conn)
        .optional()?;

    match own_xp {
        None => Ok(None),
        Some(xp) => {
            let higher: i64 = user_levels::table
                .filter(user_levels::season_id.eq(season_id))
                .filter(user_levels::xp.gt(xp))
                .count()
                .get_result(conn)?;
            Ok(Some(higher + 1))
        }
    }
}

}

backend_fn! {

/// Load a user's XP ledger entries, newest first.
#[allow(dead_code)]
pub fn xp_history(
    conn: &mut _,
    user_id: i64,
    limit: i64,
) -> Result<Vec<XpTransactionData>, PersistenceError> {
    xp_transactions::table
        .filter(xp_transactions::user_id.eq(user_id))
        .order(xp_transactions::created_at.desc())
        .limit(limit)
        .load::<XpTransactionData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("xp_history: {e}")))
}

}
