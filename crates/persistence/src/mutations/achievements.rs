// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Achievement mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewAchievement, NewArtifact};
use crate::diesel_schema::{achievements, mission_artifacts};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert an achievement together with its artifacts.
///
/// Returns the generated `achievement_id`. The achievement and all
/// artifact rows land in one transaction.
#[allow(dead_code)]
pub fn insert_achievement(
    conn: &mut _,
    new_achievement: &NewAchievement,
    artifacts: &[NewArtifact],
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(achievements::table)
            .values(new_achievement)
            .execute(conn)?;
        let achievement_id: i64 = conn.get_last_insert_rowid()?;

        for artifact in artifacts {
            let mut bound: NewArtifact = artifact.clone();
            bound.achievement_id = achievement_id;
            diesel::insert_into(mission_artifacts::table)
                .values(&bound)
                .execute(conn)?;
        }

        Ok(achievement_id)
    })
}

}

backend_fn! {

/// Delete an achievement (and its artifacts) owned by `user_id`.
///
/// Cancelling is restricted to the owning user; attempts by anyone
/// else fail without writing.
#[allow(dead_code)]
pub fn delete_achievement(
    conn: &mut _,
    achievement_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let owner: Option<i64> = achievements::table
            .filter(achievements::achievement_id.eq(achievement_id))
            .select(achievements::user_id)
            .first::<i64>(conn)
            .optional()?;

        match owner {
            None => return Err(PersistenceError::AchievementNotFound(achievement_id)),
            Some(owner_id) if owner_id != user_id => {
                return Err(PersistenceError::NotAchievementOwner {
                    achievement_id,
                    user_id,
                });
            }
            Some(_) => {}
        }

        diesel::delete(
            mission_artifacts::table
                .filter(mission_artifacts::achievement_id.eq(achievement_id)),
        )
        .execute(conn)?;
        diesel::delete(
            achievements::table.filter(achievements::achievement_id.eq(achievement_id)),
        )
        .execute(conn)?;
        Ok(())
    })
}

}
