// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Achievement submission and owner-only cancellation.

use super::helpers::{T0, persistence, seed_mission, seed_season, seed_user};
use crate::Persistence;
use crate::data_models::{NewAchievement, NewArtifact};
use crate::error::PersistenceError;
use action_board_domain::ArtifactType;

fn submit(p: &mut Persistence, user_id: i64, mission_id: i64, season_id: i64) -> i64 {
    p.insert_achievement(
        &NewAchievement {
            user_id,
            mission_id,
            season_id,
            created_at: T0.to_string(),
        },
        &[NewArtifact {
            achievement_id: 0,
            user_id,
            artifact_type: ArtifactType::Text.as_str().to_string(),
            text_content: Some("駅前でチラシを配りました".to_string()),
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: T0.to_string(),
        }],
    )
    .unwrap()
}

#[test]
fn test_submission_records_achievement_and_artifacts() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let mission_id: i64 = seed_mission(&mut p, "leafleting", 1);
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    let achievement_id: i64 = submit(&mut p, user_id, mission_id, season_id);
    assert!(achievement_id > 0);
    assert_eq!(
        p.count_user_achievements(user_id, mission_id, season_id)
            .unwrap(),
        1
    );
}

#[test]
fn test_owner_can_cancel() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let mission_id: i64 = seed_mission(&mut p, "leafleting", 1);
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    let achievement_id: i64 = submit(&mut p, user_id, mission_id, season_id);
    p.delete_achievement(achievement_id, user_id).unwrap();
    assert_eq!(
        p.count_user_achievements(user_id, mission_id, season_id)
            .unwrap(),
        0
    );
}

#[test]
fn test_non_owner_cannot_cancel() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let mission_id: i64 = seed_mission(&mut p, "leafleting", 1);
    let owner: i64 = seed_user(&mut p, "所有者", "owner@example.com", None);
    let other: i64 = seed_user(&mut p, "他人", "other@example.com", None);

    let achievement_id: i64 = submit(&mut p, owner, mission_id, season_id);

    let result = p.delete_achievement(achievement_id, other);
    assert_eq!(
        result.unwrap_err(),
        PersistenceError::NotAchievementOwner {
            achievement_id,
            user_id: other,
        }
    );

    // The achievement must survive the rejected attempt.
    assert_eq!(
        p.count_user_achievements(owner, mission_id, season_id)
            .unwrap(),
        1
    );
}

#[test]
fn test_cancelling_missing_achievement_fails() {
    let mut p: Persistence = persistence();
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    assert_eq!(
        p.delete_achievement(12345, user_id).unwrap_err(),
        PersistenceError::AchievementNotFound(12345)
    );
}
