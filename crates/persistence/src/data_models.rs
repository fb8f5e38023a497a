// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row and insert structs shared by queries and mutations.
//!
//! Integer flag columns (`is_active`, `is_hidden`, `is_notified`) store
//! 0/1; the accessor methods expose them as booleans.

use crate::diesel_schema::{
    achievements, mission_artifacts, missions, poster_board_status_history, poster_boards,
    posting_events, seasons, sessions, user_badges, user_levels, users, xp_transactions,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A user row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address_prefecture: Option<String>,
    pub avatar_url: Option<String>,
    pub date_of_birth: Option<String>,
    pub referral_code: Option<String>,
    pub created_at: String,
    pub deleted_at: Option<String>,
}

impl UserData {
    /// Whether the account has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Insertable user row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address_prefecture: Option<String>,
    pub avatar_url: Option<String>,
    pub date_of_birth: Option<String>,
    pub referral_code: Option<String>,
    pub created_at: String,
}

/// A session row.
#[derive(Debug, Clone, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Insertable session row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession {
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A season row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct SeasonData {
    pub season_id: i64,
    pub slug: String,
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: i32,
}

impl SeasonData {
    /// Whether this season is the active one.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.is_active != 0
    }
}

/// Insertable season row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = seasons)]
pub struct NewSeason {
    pub slug: String,
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: i32,
}

/// A mission row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct MissionData {
    pub mission_id: i64,
    pub slug: String,
    pub title: String,
    pub difficulty: i32,
    pub max_achievement_count: Option<i32>,
    pub required_artifact_type: String,
    pub is_hidden: i32,
}

impl MissionData {
    /// Whether the mission is hidden from listings and rankings.
    #[must_use]
    pub const fn hidden(&self) -> bool {
        self.is_hidden != 0
    }
}

/// Insertable mission row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub struct NewMission {
    pub slug: String,
    pub title: String,
    pub difficulty: i32,
    pub max_achievement_count: Option<i32>,
    pub required_artifact_type: String,
    pub is_hidden: i32,
}

/// An achievement row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct AchievementData {
    pub achievement_id: i64,
    pub user_id: i64,
    pub mission_id: i64,
    pub season_id: i64,
    pub created_at: String,
}

/// Insertable achievement row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = achievements)]
pub struct NewAchievement {
    pub user_id: i64,
    pub mission_id: i64,
    pub season_id: i64,
    pub created_at: String,
}

/// A mission artifact row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct ArtifactData {
    pub artifact_id: i64,
    pub achievement_id: i64,
    pub user_id: i64,
    pub artifact_type: String,
    pub text_content: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: String,
}

/// Insertable mission artifact row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mission_artifacts)]
pub struct NewArtifact {
    pub achievement_id: i64,
    pub user_id: i64,
    pub artifact_type: String,
    pub text_content: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: String,
}

/// A user level row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct UserLevelData {
    pub user_id: i64,
    pub season_id: i64,
    pub xp: i64,
    pub level: i32,
    pub updated_at: String,
}

/// Insertable user level row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_levels)]
pub struct NewUserLevel {
    pub user_id: i64,
    pub season_id: i64,
    pub xp: i64,
    pub level: i32,
    pub updated_at: String,
}

/// An XP transaction row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct XpTransactionData {
    pub transaction_id: i64,
    pub user_id: i64,
    pub season_id: i64,
    pub xp_amount: i64,
    pub source_type: String,
    pub source_id: Option<i64>,
    pub description: String,
    pub created_at: String,
}

/// Insertable XP transaction row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = xp_transactions)]
pub struct NewXpTransaction {
    pub user_id: i64,
    pub season_id: i64,
    pub xp_amount: i64,
    pub source_type: String,
    pub source_id: Option<i64>,
    pub description: String,
    pub created_at: String,
}

/// A user badge row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct UserBadgeData {
    pub badge_id: i64,
    pub user_id: i64,
    pub season_id: i64,
    pub badge_type: String,
    pub sub_type: Option<String>,
    pub rank: i32,
    pub is_notified: i32,
    pub achieved_at: String,
    pub updated_at: String,
}

impl UserBadgeData {
    /// Whether the owner has been notified about this badge.
    #[must_use]
    pub const fn notified(&self) -> bool {
        self.is_notified != 0
    }
}

/// Insertable user badge row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_badges)]
pub struct NewUserBadge {
    pub user_id: i64,
    pub season_id: i64,
    pub badge_type: String,
    pub sub_type: Option<String>,
    pub rank: i32,
    pub is_notified: i32,
    pub achieved_at: String,
    pub updated_at: String,
}

/// A poster board row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct PosterBoardData {
    pub board_id: i64,
    pub prefecture: String,
    pub city: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: i32,
}

/// Insertable poster board row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = poster_boards)]
pub struct NewPosterBoard {
    pub prefecture: String,
    pub city: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: i32,
}

/// A poster board status history row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct BoardStatusHistoryData {
    pub history_id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub previous_status: i32,
    pub new_status: i32,
    pub note: Option<String>,
    pub created_at: String,
}

/// Insertable poster board status history row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = poster_board_status_history)]
pub struct NewBoardStatusHistory {
    pub board_id: i64,
    pub user_id: i64,
    pub previous_status: i32,
    pub new_status: i32,
    pub note: Option<String>,
    pub created_at: String,
}

/// A posting event row.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct PostingEventData {
    pub event_id: i64,
    pub user_id: i64,
    pub season_id: i64,
    pub posted_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub note: Option<String>,
    pub created_at: String,
}

/// Insertable posting event row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posting_events)]
pub struct NewPostingEvent {
    pub user_id: i64,
    pub season_id: i64,
    pub posted_count: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub note: Option<String>,
    pub created_at: String,
}

/// One entry of a ranking snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based rank within the snapshot.
    pub rank: u32,
    /// The ranked user.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
    /// XP (or score) that produced this rank.
    pub xp: i64,
    /// The user's level in the ranked season.
    pub level: i32,
}
