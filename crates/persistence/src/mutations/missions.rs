// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission mutation operations.
//!
//! Missions are static reference data; these mutations exist for
//! seeding and administrative edits.

use crate::backend::PersistenceBackend;
use crate::data_models::NewMission;
use crate::diesel_schema::missions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new mission and return the generated `mission_id`.
#[allow(dead_code)]
pub fn create_mission(conn: &mut _, new_mission: &NewMission) -> Result<i64, PersistenceError> {
    diesel::insert_into(missions::table)
        .values(new_mission)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Hide or unhide a mission.
#[allow(dead_code)]
pub fn set_mission_hidden(
    conn: &mut _,
    mission_id: i64,
    is_hidden: i32,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(missions::table.filter(missions::mission_id.eq(mission_id)))
            .set(missions::is_hidden.eq(is_hidden))
            .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::MissionNotFound(format!("id {mission_id}")));
    }
    Ok(())
}

}
