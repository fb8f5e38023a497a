// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Badge mutation operations.
//!
//! The badge recomputation job is the sole writer of `user_badges`.
//! Upserts are keyed by (user, season, badge_type, sub_type) and only
//! write when a badge is new or its rank improved, which is what makes
//! re-running the job on an unchanged ranking snapshot a no-op.

use crate::data_models::{NewUserBadge, UserBadgeData};
use crate::diesel_schema::user_badges;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

/// Outcome of a badge upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeUpsertOutcome {
    /// No badge existed; a new row was inserted with `is_notified = false`.
    Inserted,
    /// The new rank was strictly better; the row was updated and
    /// `is_notified` reset to false.
    Improved,
    /// The existing badge was at least as good; nothing was written.
    Unchanged,
}

impl BadgeUpsertOutcome {
    /// Whether this outcome wrote a row.
    #[must_use]
    pub const fn wrote(&self) -> bool {
        matches!(self, Self::Inserted | Self::Improved)
    }
}

backend_fn! {

/// Upsert one badge for a (user, season, category, sub-type) scope.
///
/// Inserts when no badge exists; updates only when the new rank is
/// strictly smaller (better) than the stored one. Unchanged badges are
/// left untouched, including their `is_notified` flag.
#[allow(dead_code)]
#[allow(clippy::too_many_arguments)]
pub fn upsert_badge(
    conn: &mut _,
    user_id: i64,
    season_id: i64,
    badge_type: &str,
    sub_type: Option<&str>,
    rank: i32,
    now: &str,
) -> Result<BadgeUpsertOutcome, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let base = user_badges::table
            .filter(user_badges::user_id.eq(user_id))
            .filter(user_badges::season_id.eq(season_id))
            .filter(user_badges::badge_type.eq(badge_type));

        let existing: Option<UserBadgeData> = match sub_type {
            Some(sub) => base
                .filter(user_badges::sub_type.eq(sub))
                .first::<UserBadgeData>(conn)
                .optional()?,
            None => base
                .filter(user_badges::sub_type.is_null())
                .first::<UserBadgeData>(conn)
                .optional()?,
        };

        match existing {
            None => {
                let row = NewUserBadge {
                    user_id,
                    season_id,
                    badge_type: badge_type.to_string(),
                    sub_type: sub_type.map(ToString::to_string),
                    rank,
                    is_notified: 0,
                    achieved_at: now.to_string(),
                    updated_at: now.to_string(),
                };
                diesel::insert_into(user_badges::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(BadgeUpsertOutcome::Inserted)
            }
            Some(badge) if rank < badge.rank => {
                diesel::update(user_badges::table.filter(user_badges::badge_id.eq(badge.badge_id)))
                    .set((
                        user_badges::rank.eq(rank),
                        user_badges::achieved_at.eq(now),
                        user_badges::is_notified.eq(0),
                        user_badges::updated_at.eq(now),
                    ))
                    .execute(conn)?;
                Ok(BadgeUpsertOutcome::Improved)
            }
            Some(_) => Ok(BadgeUpsertOutcome::Unchanged),
        }
    })
}

}

backend_fn! {

/// Mark the given badges as notified.
#[allow(dead_code)]
pub fn mark_badges_notified(
    conn: &mut _,
    badge_ids: &[i64],
    now: &str,
) -> Result<usize, PersistenceError> {
    if badge_ids.is_empty() {
        return Ok(0);
    }
    Ok(
        diesel::update(user_badges::table.filter(user_badges::badge_id.eq_any(badge_ids)))
            .set((
                user_badges::is_notified.eq(1),
                user_badges::updated_at.eq(now),
            ))
            .execute(conn)?,
    )
}

}
