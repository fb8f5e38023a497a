// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ranking read operations.

use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::request_response::RankingResponse;
use action_board_domain::{is_prefecture, mission_xp, previous_jst_day};
use action_board_persistence::{Persistence, RankingEntry};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::error;

/// Default number of entries returned per ranking request.
const DEFAULT_RANKING_LIMIT: i64 = 100;

/// The ranking scope requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingScope {
    /// Overall season ranking.
    Overall,
    /// Previous JST day.
    Daily,
    /// One prefecture.
    Prefecture(String),
    /// One mission, by slug.
    Mission(String),
}

impl RankingScope {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Daily => "daily",
            Self::Prefecture(_) => "prefecture",
            Self::Mission(_) => "mission",
        }
    }
}

/// Returns a ranking snapshot for the active season.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `scope` - The requested scope
/// * `now` - The current instant (drives the daily window)
///
/// # Errors
///
/// Returns `InvalidInput` for unknown prefectures,
/// `ResourceNotFound` for unknown missions, and internal errors for
/// database failures.
pub fn get_ranking(
    persistence: &mut Persistence,
    scope: &RankingScope,
    now: DateTime<Utc>,
) -> ApiResult<RankingResponse> {
    let season = persistence
        .get_active_season()
        .map_err(|e| translate_persistence_error("get_ranking", &e))?;

    let entries: Vec<RankingEntry> = match scope {
        RankingScope::Overall => persistence
            .overall_ranking(season.season_id, DEFAULT_RANKING_LIMIT)
            .map_err(|e| {
                error!(error = %e, "Overall ranking failed");
                ApiError::Internal {
                    message: String::from("get_ranking failed"),
                }
            })?,
        RankingScope::Daily => {
            let window = previous_jst_day(now);
            persistence
                .period_ranking(
                    season.season_id,
                    &window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
                    &window.end.to_rfc3339_opts(SecondsFormat::Secs, true),
                    DEFAULT_RANKING_LIMIT,
                )
                .map_err(|e| {
                    error!(error = %e, "Daily ranking failed");
                    ApiError::Internal {
                        message: String::from("get_ranking failed"),
                    }
                })?
        }
        RankingScope::Prefecture(prefecture) => {
            if !is_prefecture(prefecture) {
                return Err(ApiError::InvalidInput {
                    field: String::from("prefecture"),
                    message: format!("不明な都道府県です: {prefecture}"),
                });
            }
            persistence
                .prefecture_ranking(season.season_id, prefecture, DEFAULT_RANKING_LIMIT)
                .map_err(|e| {
                    error!(error = %e, "Prefecture ranking failed");
                    ApiError::Internal {
                        message: String::from("get_ranking failed"),
                    }
                })?
        }
        RankingScope::Mission(slug) => {
            let mission = persistence
                .get_mission_by_slug(slug)
                .map_err(|e| {
                    error!(error = %e, "Mission lookup failed");
                    ApiError::Internal {
                        message: String::from("get_ranking failed"),
                    }
                })?
                .filter(|mission| !mission.hidden())
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Mission"),
                    message: format!("Mission {slug} does not exist"),
                })?;
            persistence
                .mission_ranking(
                    season.season_id,
                    mission.mission_id,
                    mission_xp(mission.difficulty),
                    DEFAULT_RANKING_LIMIT,
                )
                .map_err(|e| {
                    error!(error = %e, "Mission ranking failed");
                    ApiError::Internal {
                        message: String::from("get_ranking failed"),
                    }
                })?
        }
    };

    Ok(RankingResponse {
        scope: scope.as_str().to_string(),
        season_slug: season.slug,
        entries,
    })
}
