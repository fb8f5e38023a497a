// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission query operations.

use crate::data_models::MissionData;
use crate::diesel_schema::{achievements, missions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// List all missions that are not hidden.
#[allow(dead_code)]
pub fn list_visible_missions(conn: &mut _) -> Result<Vec<MissionData>, PersistenceError> {
    missions::table
        .filter(missions::is_hidden.eq(0))
        .order(missions::slug.asc())
        .load::<MissionData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_visible_missions: {e}")))
}

}

backend_fn! {

/// Look up a mission by slug.
#[allow(dead_code)]
pub fn get_mission_by_slug(
    conn: &mut _,
    slug: &str,
) -> Result<Option<MissionData>, PersistenceError> {
    missions::table
        .filter(missions::slug.eq(slug))
        .first::<MissionData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_mission_by_slug: {e}")))
}

}

backend_fn! {

/// Look up a mission by ID.
#[allow(dead_code)]
pub fn get_mission_by_id(
    conn: &mut _,
    mission_id: i64,
) -> Result<Option<MissionData>, PersistenceError> {
    missions::table
        .filter(missions::mission_id.eq(mission_id))
        .first::<MissionData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_mission_by_id: {e}")))
}

}

backend_fn! {

/// List missions eligible for per-mission rankings.
///
/// Repeatable missions only: `max_achievement_count` is null and the
/// mission is not hidden.
#[allow(dead_code)]
pub fn list_ranked_missions(conn: &mut _) -> Result<Vec<MissionData>, PersistenceError> {
    missions::table
        .filter(missions::max_achievement_count.is_null())
        .filter(missions::is_hidden.eq(0))
        .order(missions::slug.asc())
        .load::<MissionData>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_ranked_missions: {e}")))
}

}

backend_fn! {

/// Find the first mission requiring a given artifact type.
///
/// Used to resolve the referral mission (artifact type `REFERRAL`).
#[allow(dead_code)]
pub fn find_mission_by_artifact_type(
    conn: &mut _,
    artifact_type: &str,
) -> Result<Option<MissionData>, PersistenceError> {
    missions::table
        .filter(missions::required_artifact_type.eq(artifact_type))
        .first::<MissionData>(conn)
        .optional()
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("find_mission_by_artifact_type: {e}"))
        })
}

}

backend_fn! {

/// Count a user's achievements of one mission in one season.
#[allow(dead_code)]
pub fn count_user_achievements(
    conn: &mut _,
    user_id: i64,
    mission_id: i64,
    season_id: i64,
) -> Result<i64, PersistenceError> {
    achievements::table
        .filter(achievements::user_id.eq(user_id))
        .filter(achievements::mission_id.eq(mission_id))
        .filter(achievements::season_id.eq(season_id))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_user_achievements: {e}")))
}

}
