// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Referral processing at sign-up.
//!
//! When a sign-up arrives through an invite URL, the referrer is
//! credited with an achievement of the referral mission, a REFERRAL
//! artifact storing the invitee's lowercased email, and the mission's
//! XP. Every failure here is logged and swallowed: the invitee's
//! registration must never depend on the referrer's reward.

use crate::auth::fmt_rfc3339;
use action_board_domain::{ArtifactType, XpSource, mission_xp};
use action_board_persistence::{NewAchievement, NewArtifact, Persistence};
use time::OffsetDateTime;
use tracing::warn;

/// Processes a referral code for a completed sign-up.
///
/// Returns `true` when the referrer was credited. Invalid codes,
/// duplicate invitee emails, and persistence failures all return
/// `false` after logging.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `referral_code` - The code from the invite URL
/// * `invitee_email` - The email of the user who just signed up
/// * `now` - The current instant
pub fn process_referral(
    persistence: &mut Persistence,
    referral_code: &str,
    invitee_email: &str,
    now: OffsetDateTime,
) -> bool {
    let code: &str = referral_code.trim();
    if code.is_empty() {
        return false;
    }
    let email: String = invitee_email.to_lowercase();

    let valid: bool = match persistence.is_valid_referral_code(code) {
        Ok(valid) => valid,
        Err(e) => {
            warn!(error = %e, "Referral code check failed");
            return false;
        }
    };
    let duplicate: bool = match persistence.is_email_already_used_in_referral(&email) {
        Ok(duplicate) => duplicate,
        Err(e) => {
            warn!(error = %e, "Referral duplicate check failed");
            return false;
        }
    };
    if !valid || duplicate {
        return false;
    }

    let Some(mission) = persistence
        .find_mission_by_artifact_type(ArtifactType::Referral.as_str())
        .unwrap_or_else(|e| {
            warn!(error = %e, "Referral mission lookup failed");
            None
        })
    else {
        return false;
    };
    let Some(referrer) = persistence
        .find_user_by_referral_code(code)
        .unwrap_or_else(|e| {
            warn!(error = %e, "Referrer lookup failed");
            None
        })
    else {
        return false;
    };

    let season = match persistence.get_active_season() {
        Ok(season) => season,
        Err(e) => {
            warn!(error = %e, "No active season; referral not credited");
            return false;
        }
    };
    let Ok(now_str) = fmt_rfc3339(now) else {
        return false;
    };

    let achievement_id: i64 = match persistence.insert_achievement(
        &NewAchievement {
            user_id: referrer.user_id,
            mission_id: mission.mission_id,
            season_id: season.season_id,
            created_at: now_str.clone(),
        },
        &[NewArtifact {
            achievement_id: 0,
            user_id: referrer.user_id,
            artifact_type: ArtifactType::Referral.as_str().to_string(),
            text_content: Some(email),
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: now_str.clone(),
        }],
    ) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Referral achievement insert failed");
            return false;
        }
    };

    let reward: i64 = mission_xp(mission.difficulty);
    if let Err(e) = persistence.grant_xp(
        referrer.user_id,
        season.season_id,
        reward,
        XpSource::Referral.as_str(),
        Some(achievement_id),
        &format!("ミッション「{}」達成による経験値獲得", mission.title),
        &now_str,
    ) {
        warn!(error = %e, "Referral XP grant failed");
        return false;
    }

    true
}
