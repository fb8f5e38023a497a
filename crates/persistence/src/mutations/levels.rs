// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User level and XP mutation operations.
//!
//! XP grants are two writes in one transaction: an append to the
//! `xp_transactions` ledger and the derived `user_levels` update.
//! The level is recomputed from the new cumulative XP with the domain
//! curve, never incremented directly.

use crate::data_models::{NewUserLevel, NewXpTransaction, UserLevelData};
use crate::diesel_schema::user_levels;
use crate::diesel_schema::xp_transactions;
use crate::error::PersistenceError;
use action_board_domain::calculate_level;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Create the level row for a user in a season, if missing.
///
/// New users start at 0 XP, level 1. Re-initializing an existing row
/// is a no-op, so the call is safe at every sign-in.
#[allow(dead_code)]
pub fn initialize_user_level(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
    now: &str,
) -> Result<UserLevelData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: Option<UserLevelData> = user_levels::table
            .filter(user_levels::user_id.eq(user_id))
            .filter(user_levels::season_id.eq(season_id))
            .first::<UserLevelData>(conn)
            .optional()?;

        if let Some(row) = existing {
            return Ok(row);
        }

        let row = NewUserLevel {
            user_id,
            season_id,
            xp: 0,
            level: 1,
            updated_at: now.to_string(),
        };
        diesel::insert_into(user_levels::table)
            .values(&row)
            .execute(conn)?;

        Ok(UserLevelData {
            user_id,
            season_id,
            xp: 0,
            level: 1,
            updated_at: now.to_string(),
        })
    })
}

}

backend_fn! {

/// Record an XP grant and update the derived level row.
///
/// Appends one ledger entry and recomputes (xp, level) for the
/// (user, season) pair inside a single transaction. Returns the
/// updated level row.
#[allow(dead_code)]
#[allow(clippy::too_many_arguments)]
pub fn grant_xp(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
    xp_amount: i64,
    source_type: &str,
    source_id: Option<i64>,
    description: &str,
    now: &str,
) -> Result<UserLevelData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let ledger_entry = NewXpTransaction {
            user_id,
            season_id,
            xp_amount,
            source_type: source_type.to_string(),
            source_id,
            description: description.to_string(),
            created_at: now.to_string(),
        };
        diesel::insert_into(xp_transactions::table)
            .values(&ledger_entry)
            .execute(conn)?;

        let existing: Option<UserLevelData> = user_levels::table
            .filter(user_levels::user_id.eq(user_id))
            .filter(user_levels::season_id.eq(season_id))
            .first::<UserLevelData>(conn)
            .optional()?;

        let current_xp: i64 = match &existing {
            Some(row) => row.xp,
            None => {
                let row = NewUserLevel {
                    user_id,
                    season_id,
                    xp: 0,
                    level: 1,
                    updated_at: now.to_string(),
                };
                diesel::insert_into(user_levels::table)
                    .values(&row)
                    .execute(conn)?;
                0
            }
        };

        let new_xp: i64 = current_xp + xp_amount;
        let new_level: i32 = i32::try_from(calculate_level(new_xp)).unwrap_or(i32::MAX);

        diesel::update(
            user_levels::table
                .filter(user_levels::user_id.eq(user_id))
                .filter(user_levels::season_id.eq(season_id)),
        )
        .set((
            user_levels::xp.eq(new_xp),
            user_levels::level.eq(new_level),
            user_levels::updated_at.eq(now),
        ))
        .execute(conn)?;

        Ok(UserLevelData {
            user_id,
            season_id,
            xp: new_xp,
            level: new_level,
            updated_at: now.to_string(),
        })
    })
}

}
