// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ranking snapshot queries.
//!
//! The original backing store exposed these as a precomputed ranking
//! view; here each snapshot is an ordered aggregation query. All
//! snapshots order by score descending with a stable tie order
//! (ascending user ID), and deleted users never appear.

use crate::data_models::RankingEntry;
use crate::diesel_schema::{achievements, user_levels, users, xp_transactions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

fn to_entries(rows: Vec<(i64, String, i64, i32)>) -> Vec<RankingEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(index, (user_id, name, xp, level))| RankingEntry {
            rank: u32::try_from(index + 1).unwrap_or(u32::MAX),
            user_id,
            name,
            xp,
            level,
        })
        .collect()
}

backend_fn! {

/// Overall season ranking: users ordered by cumulative XP.
#[allow(dead_code)]
pub fn overall_ranking(
    conn: &mut _,
    season_id: i64,
    limit: i64,
) -> Result<Vec<RankingEntry>, PersistenceError> {
    let rows: Vec<(i64, String, i64, i32)> = user_levels::table
        .inner_join(users::table)
        .filter(user_levels::season_id.eq(season_id))
        .filter(users::deleted_at.is_null())
        .order((user_levels::xp.desc(), user_levels::user_id.asc()))
        .limit(limit)
        .select((
            user_levels::user_id,
            users::name,
            user_levels::xp,
            user_levels::level,
        ))
        .load::<(i64, String, i64, i32)>(conn)?;

    Ok(to_entries(rows))
}

}

backend_fn! {

/// Per-prefecture season ranking.
#[allow(dead_code)]
pub fn prefecture_ranking(
    conn: &mut _,
    season_id: i64,
    prefecture: &str,
    limit: i64,
) -> Result<Vec<RankingEntry>, PersistenceError> {
    let rows: Vec<(i64, String, i64, i32)> = user_levels::table
        .inner_join(users::table)
        .filter(user_levels::season_id.eq(season_id))
        .filter(users::deleted_at.is_null())
        .filter(users::address_prefecture.eq(prefecture))
        .order((user_levels::xp.desc(), user_levels::user_id.asc()))
        .limit(limit)
        .select((
            user_levels::user_id,
            users::name,
            user_levels::xp,
            user_levels::level,
        ))
        .load::<(i64, String, i64, i32)>(conn)?;

    Ok(to_entries(rows))
}

}

backend_fn! {

/// Period ranking: XP summed from the ledger within `[start, end)`.
///
/// Timestamps are RFC 3339 UTC strings, so lexicographic comparison
/// matches chronological order. The daily badge pass feeds this the
/// previous JST day.
#[allow(dead_code)]
pub fn period_ranking(
    conn: &mut _,
    season_id: i64,
    period_start: &str,
    period_end: &str,
    limit: i64,
) -> Result<Vec<RankingEntry>, PersistenceError> {
    let totals: Vec<(i64, Option<i64>)> = xp_transactions::table
        .filter(xp_transactions::season_id.eq(season_id))
        .filter(xp_transactions::created_at.ge(period_start))
        .filter(xp_transactions::created_at.lt(period_end))
        .group_by(xp_transactions::user_id)
        .select((
            xp_transactions::user_id,
            diesel::dsl::sql::<diesel::sql_types::Nullable<diesel::sql_types::BigInt>>(
                "SUM(xp_amount)",
            ),
        ))
        .load::<(i64, Option<i64>)>(conn)?;

    let mut scored: Vec<(i64, i64)> = totals
        .into_iter()
        .map(|(user_id, total)| (user_id, total.unwrap_or(0)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(usize::try_from(limit.max(0)).unwrap_or(0));

    let user_ids: Vec<i64> = scored.iter().map(|(user_id, _)| *user_id).collect();
    let mut entries: Vec<RankingEntry> = Vec::with_capacity(user_ids.len());

    let mut names: std::collections::HashMap<i64, (String, i32)> =
        std::collections::HashMap::new();
    for batch in crate::chunk::chunk(&user_ids, crate::chunk::DEFAULT_CHUNK_SIZE) {
        let rows: Vec<(i64, String, i32)> = user_levels::table
            .inner_join(users::table)
            .filter(user_levels::season_id.eq(season_id))
            .filter(users::deleted_at.is_null())
            .filter(user_levels::user_id.eq_any(&batch))
            .select((user_levels::user_id, users::name, user_levels::level))
            .load::<(i64, String, i32)>(conn)?;
        for (user_id, name, level) in rows {
            names.insert(user_id, (name, level));
        }
    }

    for (user_id, total) in scored {
        // Deleted users drop out of the snapshot here.
        if let Some((name, level)) = names.get(&user_id) {
            entries.push(RankingEntry {
                rank: 0,
                user_id,
                name: name.clone(),
                xp: total,
                level: *level,
            });
        }
    }
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }

    Ok(entries)
}

}

backend_fn! {

/// Per-mission ranking: achievement count scored with the mission's XP.
///
/// `xp_per_achievement` is the mission's difficulty reward; the score
/// column of each entry is `count * xp_per_achievement`.
#[allow(dead_code)]
pub fn mission_ranking(
    conn: &mut _,
    season_id: i64,
    mission_id: i64,
    xp_per_achievement: i64,
    limit: i64,
) -> Result<Vec<RankingEntry>, PersistenceError> {
    let counts: Vec<(i64, i64)> = achievements::table
        .filter(achievements::season_id.eq(season_id))
        .filter(achievements::mission_id.eq(mission_id))
        .group_by(achievements::user_id)
        .select((achievements::user_id, diesel::dsl::count_star()))
        .load::<(i64, i64)>(conn)?;

    let mut scored: Vec<(i64, i64)> = counts
        .into_iter()
        .map(|(user_id, count)| (user_id, count * xp_per_achievement))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(usize::try_from(limit.max(0)).unwrap_or(0));

    let user_ids: Vec<i64> = scored.iter().map(|(user_id, _)| *user_id).collect();
    let mut names: std::collections::HashMap<i64, (String, i32)> =
        std::collections::HashMap::new();
    for batch in crate::chunk::chunk(&user_ids, crate::chunk::DEFAULT_CHUNK_SIZE) {
        let rows: Vec<(i64, String, i32)> = user_levels::table
            .inner_join(users::table)
            .filter(user_levels::season_id.eq(season_id))
            .filter(users::deleted_at.is_null())
            .filter(user_levels::user_id.eq_any(&batch))
            .select((user_levels::user_id, users::name, user_levels::level))
            .load::<(i64, String, i32)>(conn)?;
        for (user_id, name, level) in rows {
            names.insert(user_id, (name, level));
        }
    }

    let mut entries: Vec<RankingEntry> = Vec::with_capacity(user_ids.len());
    for (user_id, score) in scored {
        if let Some((name, level)) = names.get(&user_id) {
            entries.push(RankingEntry {
                rank: 0,
                user_id,
                name: name.clone(),
                xp: score,
                level: *level,
            });
        }
    }
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }

    Ok(entries)
}

}
