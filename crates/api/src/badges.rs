// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Badge recomputation and badge views.
//!
//! The recomputation job walks the overall, previous-JST-day,
//! per-prefecture, and per-mission ranking snapshots and upserts one
//! badge per qualifying entrant. It is idempotent (re-running an
//! unchanged snapshot writes nothing) and is the sole writer of the
//! badge table, so it runs without locking.

use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::request_response::BadgeView;
use action_board_domain::{
    BadgeAssignment, BadgeCutoffs, BadgeKind, BadgeTier, JstDayWindow, PREFECTURES, mission_xp,
    previous_jst_day,
};
use action_board_persistence::{Persistence, RankingEntry, SeasonData};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Result of one badge category pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Whether the pass completed without a fatal error.
    pub success: bool,
    /// Number of badges inserted or improved.
    pub updated_count: u64,
}

/// Summary of a full badge recomputation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCalculationSummary {
    /// Overall ranking pass.
    pub all: CategoryResult,
    /// Previous-day ranking pass.
    pub daily: CategoryResult,
    /// Per-prefecture passes.
    pub prefecture: CategoryResult,
    /// Per-mission passes.
    pub mission: CategoryResult,
}

impl BadgeCalculationSummary {
    /// Whether every category pass succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.all.success && self.daily.success && self.prefecture.success && self.mission.success
    }

    /// Total badges inserted or improved across all categories.
    #[must_use]
    pub const fn total_updated(&self) -> u64 {
        self.all.updated_count
            + self.daily.updated_count
            + self.prefecture.updated_count
            + self.mission.updated_count
    }
}

fn upsert_snapshot(
    persistence: &mut Persistence,
    season_id: i64,
    kind: BadgeKind,
    sub_type: Option<&str>,
    snapshot: &[RankingEntry],
    cutoff: u32,
    now: &str,
) -> Result<u64, ApiError> {
    let mut updated: u64 = 0;
    for entry in snapshot {
        if entry.rank > cutoff {
            break;
        }
        let assignment = BadgeAssignment {
            user_id: entry.user_id,
            kind,
            sub_type: sub_type.map(ToString::to_string),
            rank: entry.rank,
        };
        assignment
            .validate()
            .map_err(crate::error::translate_domain_error)?;

        let rank: i32 = i32::try_from(entry.rank).unwrap_or(i32::MAX);
        let outcome = persistence
            .upsert_badge(entry.user_id, season_id, kind.as_str(), sub_type, rank, now)
            .map_err(|e| {
                error!(error = %e, kind = %kind, "Badge upsert failed");
                translate_persistence_error("recompute_badges", &e)
            })?;
        if outcome.wrote() {
            updated += 1;
        }
    }
    Ok(updated)
}

fn resolve_season(
    persistence: &mut Persistence,
    season_slug: Option<&str>,
) -> ApiResult<SeasonData> {
    match season_slug {
        Some(slug) => persistence
            .get_season_by_slug(slug)
            .map_err(|e| translate_persistence_error("recompute_badges", &e))?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Season"),
                message: format!("Season {slug} does not exist"),
            }),
        None => persistence
            .get_active_season()
            .map_err(|e| translate_persistence_error("recompute_badges", &e)),
    }
}

/// Recomputes all four badge categories against current rankings.
///
/// Per-prefecture and per-mission passes log and skip snapshots that
/// fail instead of aborting the whole run, mirroring how the nightly
/// job should degrade. The returned summary carries per-category
/// updated counts.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `cutoffs` - Per-category rank cutoffs
/// * `season_slug` - Target season, or `None` for the active one
/// * `now` - The current instant (UTC)
///
/// # Errors
///
/// Returns an error if the target season cannot be resolved.
pub fn calculate_all_badges(
    persistence: &mut Persistence,
    cutoffs: BadgeCutoffs,
    season_slug: Option<&str>,
    now: DateTime<Utc>,
) -> ApiResult<BadgeCalculationSummary> {
    let season: SeasonData = resolve_season(persistence, season_slug)?;
    let now_str: String = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    info!(season = %season.slug, "Starting badge recomputation");

    let all: CategoryResult =
        calculate_all_category(persistence, season.season_id, cutoffs, &now_str);
    let daily: CategoryResult =
        calculate_daily_category(persistence, season.season_id, cutoffs, now, &now_str);
    let prefecture: CategoryResult =
        calculate_prefecture_category(persistence, season.season_id, cutoffs, &now_str);
    let mission: CategoryResult =
        calculate_mission_category(persistence, season.season_id, cutoffs, &now_str);

    let summary = BadgeCalculationSummary {
        all,
        daily,
        prefecture,
        mission,
    };
    info!(
        total_updated = summary.total_updated(),
        success = summary.success(),
        "Badge recomputation finished"
    );
    Ok(summary)
}

fn calculate_all_category(
    persistence: &mut Persistence,
    season_id: i64,
    cutoffs: BadgeCutoffs,
    now: &str,
) -> CategoryResult {
    let cutoff: u32 = cutoffs.cutoff_for(BadgeKind::All);
    let snapshot = match persistence.overall_ranking(season_id, i64::from(cutoff)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Overall ranking fetch failed");
            return CategoryResult {
                success: false,
                updated_count: 0,
            };
        }
    };
    match upsert_snapshot(
        persistence,
        season_id,
        BadgeKind::All,
        None,
        &snapshot,
        cutoff,
        now,
    ) {
        Ok(updated_count) => CategoryResult {
            success: true,
            updated_count,
        },
        Err(_) => CategoryResult {
            success: false,
            updated_count: 0,
        },
    }
}

fn calculate_daily_category(
    persistence: &mut Persistence,
    season_id: i64,
    cutoffs: BadgeCutoffs,
    now: DateTime<Utc>,
    now_str: &str,
) -> CategoryResult {
    let cutoff: u32 = cutoffs.cutoff_for(BadgeKind::Daily);
    let window: JstDayWindow = previous_jst_day(now);
    let start: String = window.start.to_rfc3339_opts(SecondsFormat::Secs, true);
    let end: String = window.end.to_rfc3339_opts(SecondsFormat::Secs, true);
    info!(%start, %end, "Calculating daily ranking for the previous JST day");

    let snapshot = match persistence.period_ranking(season_id, &start, &end, i64::from(cutoff)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Daily ranking fetch failed");
            return CategoryResult {
                success: false,
                updated_count: 0,
            };
        }
    };
    match upsert_snapshot(
        persistence,
        season_id,
        BadgeKind::Daily,
        None,
        &snapshot,
        cutoff,
        now_str,
    ) {
        Ok(updated_count) => CategoryResult {
            success: true,
            updated_count,
        },
        Err(_) => CategoryResult {
            success: false,
            updated_count: 0,
        },
    }
}

fn calculate_prefecture_category(
    persistence: &mut Persistence,
    season_id: i64,
    cutoffs: BadgeCutoffs,
    now: &str,
) -> CategoryResult {
    let cutoff: u32 = cutoffs.cutoff_for(BadgeKind::Prefecture);
    let mut updated_count: u64 = 0;
    let mut success: bool = true;

    for prefecture in PREFECTURES {
        let snapshot =
            match persistence.prefecture_ranking(season_id, prefecture, i64::from(cutoff)) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(error = %e, prefecture, "Prefecture ranking fetch failed");
                    success = false;
                    continue;
                }
            };
        match upsert_snapshot(
            persistence,
            season_id,
            BadgeKind::Prefecture,
            Some(prefecture),
            &snapshot,
            cutoff,
            now,
        ) {
            Ok(updated) => updated_count += updated,
            Err(_) => success = false,
        }
    }

    CategoryResult {
        success,
        updated_count,
    }
}

fn calculate_mission_category(
    persistence: &mut Persistence,
    season_id: i64,
    cutoffs: BadgeCutoffs,
    now: &str,
) -> CategoryResult {
    let cutoff: u32 = cutoffs.cutoff_for(BadgeKind::Mission);
    let missions = match persistence.list_ranked_missions() {
        Ok(missions) => missions,
        Err(e) => {
            error!(error = %e, "Ranked mission listing failed");
            return CategoryResult {
                success: false,
                updated_count: 0,
            };
        }
    };

    let mut updated_count: u64 = 0;
    let mut success: bool = true;

    for mission in missions {
        let snapshot = match persistence.mission_ranking(
            season_id,
            mission.mission_id,
            mission_xp(mission.difficulty),
            i64::from(cutoff),
        ) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, mission = %mission.slug, "Mission ranking fetch failed");
                success = false;
                continue;
            }
        };
        match upsert_snapshot(
            persistence,
            season_id,
            BadgeKind::Mission,
            Some(&mission.slug),
            &snapshot,
            cutoff,
            now,
        ) {
            Ok(updated) => updated_count += updated,
            Err(_) => success = false,
        }
    }

    CategoryResult {
        success,
        updated_count,
    }
}

fn to_badge_view(badge: &action_board_persistence::UserBadgeData) -> BadgeView {
    let rank: u32 = u32::try_from(badge.rank.max(1)).unwrap_or(u32::MAX);
    BadgeView {
        badge_id: badge.badge_id,
        badge_type: badge.badge_type.clone(),
        sub_type: badge.sub_type.clone(),
        rank: badge.rank,
        tier: BadgeTier::for_rank(rank).emoji().to_string(),
        is_notified: badge.notified(),
        achieved_at: badge.achieved_at.clone(),
    }
}

/// Loads a user's badges for the active season.
///
/// # Errors
///
/// Returns an error if the reads fail or no season is active.
pub fn get_user_badges(persistence: &mut Persistence, user_id: i64) -> ApiResult<Vec<BadgeView>> {
    let season = persistence
        .get_active_season()
        .map_err(|e| translate_persistence_error("get_user_badges", &e))?;
    let badges = persistence
        .get_user_badges(user_id, season.season_id)
        .map_err(|e| {
            error!(error = %e, "Badge listing failed");
            ApiError::Internal {
                message: String::from("get_user_badges failed"),
            }
        })?;
    Ok(badges.iter().map(to_badge_view).collect())
}

/// Loads a user's unnotified badges.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn get_unnotified_badges(
    persistence: &mut Persistence,
    user_id: i64,
) -> ApiResult<Vec<BadgeView>> {
    let badges = persistence.get_unnotified_badges(user_id).map_err(|e| {
        error!(error = %e, "Unnotified badge listing failed");
        ApiError::Internal {
            message: String::from("get_unnotified_badges failed"),
        }
    })?;
    Ok(badges.iter().map(to_badge_view).collect())
}

/// Marks badges as notified.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_badges_notified(
    persistence: &mut Persistence,
    badge_ids: &[i64],
    now: DateTime<Utc>,
) -> ApiResult<usize> {
    let now_str: String = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    persistence
        .mark_badges_notified(badge_ids, &now_str)
        .map_err(|e| {
            error!(error = %e, "Badge notification update failed");
            ApiError::Internal {
                message: String::from("mark_badges_notified failed"),
            }
        })
}
