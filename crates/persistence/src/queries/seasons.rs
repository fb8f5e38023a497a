// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season query operations.

use crate::data_models::SeasonData;
use crate::diesel_schema::seasons;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Return the currently active season.
#[allow(dead_code)]
pub fn get_active_season(conn: &mut _) -> Result<SeasonData, PersistenceError> {
    seasons::table
        .filter(seasons::is_active.eq(1))
        .first::<SeasonData>(conn)
        .optional()?
        .ok_or(PersistenceError::NoActiveSeason)
}

}

backend_fn! {

/// Look up a season by slug.
#[allow(dead_code)]
pub fn get_season_by_slug(
    conn: &mut _,
    slug: &str,
) -> Result<Option<SeasonData>, PersistenceError> {
    seasons::table
        .filter(seasons::slug.eq(slug))
        .first::<SeasonData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_season_by_slug: {e}")))
}

}

backend_fn! {

/// List all seasons, newest start date first.
#[allow(dead_code)]
pub fn list_seasons(conn: &mut _) -> Result<Vec<SeasonData>, PersistenceError> {
    seasons::table
        .order(seasons::start_date.desc())
        .load::<SeasonData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_seasons: {e}")))
}

}
