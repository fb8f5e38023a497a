// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.

use action_board_persistence::RankingEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sign-up request payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignUpRequest {
    /// The new user's email address.
    pub email: String,
    /// The new user's password (validated against the policy).
    pub password: String,
    /// The new user's display name.
    pub name: String,
    /// Birth date (ISO 8601, e.g. `2000-01-01`). Gated to adults.
    pub date_of_birth: String,
    /// Prefecture of residence, if provided.
    pub address_prefecture: Option<String>,
    /// Referral code from an invite URL, if the sign-up came from one.
    pub referral_code: Option<String>,
}

/// One artifact attached to a mission submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactInput {
    /// The artifact type (`TEXT`, `IMAGE`, `GEOLOCATION`, ...).
    pub artifact_type: String,
    /// Free-form text content.
    pub text_content: Option<String>,
    /// Uploaded image URL.
    pub image_url: Option<String>,
    /// Latitude for geolocation proofs.
    pub latitude: Option<f64>,
    /// Longitude for geolocation proofs.
    pub longitude: Option<f64>,
}

/// Mission submission request payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitAchievementRequest {
    /// Slug of the mission being reported.
    pub mission_slug: String,
    /// Attached proof artifacts.
    pub artifacts: Vec<ArtifactInput>,
}

/// A user's level information for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelView {
    /// Cumulative XP in the season.
    pub xp: i64,
    /// Current level.
    pub level: u32,
    /// XP still needed to reach the next level.
    pub xp_to_next_level: i64,
    /// Progress through the current level in `[0, 1]`.
    pub progress: f64,
    /// 1-based overall rank in the season, when the user is ranked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
}

/// Mission submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAchievementResponse {
    /// The recorded achievement's ID.
    pub achievement_id: i64,
    /// XP granted for this submission.
    pub xp_granted: i64,
    /// The user's level information after the grant.
    pub level: LevelView,
}

/// Poster board status update request payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateBoardStatusRequest {
    /// The new status name (e.g. `reserved`, `done`).
    pub status: String,
    /// Optional free-form note shown in the history.
    pub note: Option<String>,
}

/// Poster board status update response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBoardStatusResponse {
    /// The board that changed.
    pub board_id: i64,
    /// The status before the change.
    pub previous_status: String,
    /// The status after the change.
    pub new_status: String,
}

/// One entry of a board's status history, prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardHistoryEntry {
    /// The acting user's name, masked for public display.
    pub user_name: String,
    /// The status before the change.
    pub previous_status: String,
    /// The status after the change.
    pub new_status: String,
    /// Optional note entered by the actor.
    pub note: Option<String>,
    /// When the change happened (RFC 3339 UTC).
    pub created_at: String,
}

/// Per-prefecture board statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardStatusCountsResponse {
    /// The prefecture the counts cover.
    pub prefecture: String,
    /// Total number of boards in the prefecture.
    pub total_count: i64,
    /// Board count per status name.
    pub status_counts: BTreeMap<String, i64>,
}

/// A ranking snapshot response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    /// The ranking scope (`overall`, `daily`, `prefecture`, `mission`).
    pub scope: String,
    /// The ranked season's slug.
    pub season_slug: String,
    /// The entries, best rank first.
    pub entries: Vec<RankingEntry>,
}

/// A badge prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeView {
    /// The badge row ID.
    pub badge_id: i64,
    /// The badge category (`ALL`, `DAILY`, `PREFECTURE`, `MISSION`).
    pub badge_type: String,
    /// The category sub-type (prefecture name or mission slug).
    pub sub_type: Option<String>,
    /// The 1-based rank the badge records.
    pub rank: i32,
    /// Display tier emoji derived from the rank.
    pub tier: String,
    /// Whether the owner has been notified.
    pub is_notified: bool,
    /// When the rank was achieved (RFC 3339 UTC).
    pub achieved_at: String,
}
