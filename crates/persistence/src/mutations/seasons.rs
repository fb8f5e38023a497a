// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewSeason;
use crate::diesel_schema::seasons;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new season and return the generated `season_id`.
#[allow(dead_code)]
pub fn create_season(conn: &mut _, new_season: &NewSeason) -> Result<i64, PersistenceError> {
    diesel::insert_into(seasons::table)
        .values(new_season)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Mark one season active and every other season inactive.
///
/// The clear-then-set runs in one transaction so the "exactly one
/// active season" invariant cannot be observed broken.
#[allow(dead_code)]
pub fn set_active_season(conn: &mut _, season_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: i64 = seasons::table
            .filter(seasons::season_id.eq(season_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::SeasonNotFound(format!("id {season_id}")));
        }

        diesel::update(seasons::table)
            .set(seasons::is_active.eq(0))
            .execute(conn)?;
        diesel::update(seasons::table.filter(seasons::season_id.eq(season_id)))
            .set(seasons::is_active.eq(1))
            .execute(conn)?;
        Ok(())
    })
}

}
