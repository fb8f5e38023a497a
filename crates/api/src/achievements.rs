// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission submission and cancellation.

use crate::auth::{AuthenticatedUser, fmt_rfc3339};
use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::levels::level_view_for_xp;
use crate::request_response::{ArtifactInput, SubmitAchievementRequest, SubmitAchievementResponse};
use action_board_domain::{ArtifactType, XpSource, is_valid_url, mission_xp};
use action_board_persistence::{
    MissionData, NewAchievement, NewArtifact, Persistence, UserLevelData,
};
use time::OffsetDateTime;
use tracing::error;

fn to_new_artifact(
    input: &ArtifactInput,
    user_id: i64,
    created_at: &str,
) -> ApiResult<NewArtifact> {
    let artifact_type: ArtifactType = input.artifact_type.parse().map_err(|_| {
        ApiError::InvalidInput {
            field: String::from("artifact_type"),
            message: format!("不明なアーティファクト種別です: {}", input.artifact_type),
        }
    })?;

    if let Some(image_url) = input.image_url.as_deref()
        && !is_valid_url(image_url)
    {
        return Err(ApiError::InvalidInput {
            field: String::from("image_url"),
            message: String::from("画像URLの形式が正しくありません"),
        });
    }

    Ok(NewArtifact {
        achievement_id: 0,
        user_id,
        artifact_type: artifact_type.as_str().to_string(),
        text_content: input.text_content.clone(),
        image_url: input.image_url.clone(),
        latitude: input.latitude,
        longitude: input.longitude,
        created_at: created_at.to_string(),
    })
}

/// Records a mission achievement for the signed-in user.
///
/// The mission must exist and not be hidden; the per-user achievement
/// cap is enforced when the mission has one. On success the mission's
/// XP is granted and the updated level view returned.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user` - The signed-in user
/// * `request` - The submission payload
/// * `now` - The current instant
///
/// # Errors
///
/// Returns typed failures for unknown missions, reached caps, and
/// invalid artifacts; internal errors for persistence failures.
pub fn submit_achievement(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &SubmitAchievementRequest,
    now: OffsetDateTime,
) -> ApiResult<SubmitAchievementResponse> {
    let mission: MissionData = persistence
        .get_mission_by_slug(&request.mission_slug)
        .map_err(|e| {
            error!(error = %e, "Mission lookup failed");
            ApiError::Internal {
                message: String::from("submit_achievement failed"),
            }
        })?
        .filter(|mission| !mission.hidden())
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message: format!("Mission {} does not exist", request.mission_slug),
        })?;

    let season = persistence
        .get_active_season()
        .map_err(|e| translate_persistence_error("submit_achievement", &e))?;

    if let Some(max_count) = mission.max_achievement_count {
        let achieved: i64 = persistence
            .count_user_achievements(user.user_id, mission.mission_id, season.season_id)
            .map_err(|e| {
                error!(error = %e, "Achievement count failed");
                ApiError::Internal {
                    message: String::from("submit_achievement failed"),
                }
            })?;
        if achieved >= i64::from(max_count) {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("max_achievement_count"),
                message: String::from("このミッションは達成回数の上限に達しています"),
            });
        }
    }

    let now_str: String = fmt_rfc3339(now)?;
    let artifacts: Vec<NewArtifact> = request
        .artifacts
        .iter()
        .map(|input| to_new_artifact(input, user.user_id, &now_str))
        .collect::<ApiResult<Vec<NewArtifact>>>()?;

    let achievement_id: i64 = persistence
        .insert_achievement(
            &NewAchievement {
                user_id: user.user_id,
                mission_id: mission.mission_id,
                season_id: season.season_id,
                created_at: now_str.clone(),
            },
            &artifacts,
        )
        .map_err(|e| {
            error!(error = %e, "Achievement insert failed");
            ApiError::Internal {
                message: String::from("submit_achievement failed"),
            }
        })?;

    let xp_granted: i64 = mission_xp(mission.difficulty);
    let level: UserLevelData = persistence
        .grant_xp(
            user.user_id,
            season.season_id,
            xp_granted,
            XpSource::MissionCompletion.as_str(),
            Some(achievement_id),
            &format!("ミッション「{}」達成による経験値獲得", mission.title),
            &now_str,
        )
        .map_err(|e| {
            error!(error = %e, "XP grant failed");
            ApiError::Internal {
                message: String::from("submit_achievement failed"),
            }
        })?;

    Ok(SubmitAchievementResponse {
        achievement_id,
        xp_granted,
        level: level_view_for_xp(level.xp),
    })
}

/// Cancels an achievement owned by the signed-in user.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user` - The signed-in user
/// * `achievement_id` - The achievement to cancel
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown achievements and
/// `Unauthorized` when the achievement belongs to someone else.
pub fn cancel_achievement(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    achievement_id: i64,
) -> ApiResult<()> {
    persistence
        .delete_achievement(achievement_id, user.user_id)
        .map_err(|e| {
            error!(error = %e, achievement_id, "Achievement cancellation failed");
            translate_persistence_error("cancel_achievement", &e)
        })
}
