// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission submission, caps, XP grants, and cancellation.

use super::helpers::{now, persistence, seed_mission, signed_up_user};
use crate::achievements::{cancel_achievement, submit_achievement};
use crate::error::ApiError;
use crate::request_response::{ArtifactInput, SubmitAchievementRequest};
use action_board_domain::ArtifactType;
use action_board_persistence::Persistence;

fn text_submission(mission_slug: &str) -> SubmitAchievementRequest {
    SubmitAchievementRequest {
        mission_slug: mission_slug.to_string(),
        artifacts: vec![ArtifactInput {
            artifact_type: ArtifactType::Text.as_str().to_string(),
            text_content: Some("駅前でポスターを貼りました".to_string()),
            image_url: None,
            latitude: None,
            longitude: None,
        }],
    }
}

#[test]
fn test_submission_grants_mission_xp() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "poster", 3, None, ArtifactType::Text);
    let user = signed_up_user(&mut p, "tanaka@example.com");

    let response = submit_achievement(&mut p, &user, &text_submission("poster"), now()).unwrap();
    // Difficulty 3 pays 200 XP; that lands mid level 4 (threshold 165).
    assert_eq!(response.xp_granted, 200);
    assert_eq!(response.level.xp, 200);
    assert_eq!(response.level.level, 4);
    assert!(response.level.xp_to_next_level > 0);
}

#[test]
fn test_unknown_and_hidden_missions_are_not_found() {
    let mut p: Persistence = persistence();
    let mission_id: i64 = seed_mission(&mut p, "secret", 1, None, ArtifactType::Text);
    p.set_mission_hidden(mission_id, true).unwrap();
    let user = signed_up_user(&mut p, "tanaka@example.com");

    assert!(matches!(
        submit_achievement(&mut p, &user, &text_submission("nope"), now()).unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        submit_achievement(&mut p, &user, &text_submission("secret"), now()).unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_achievement_cap_is_enforced() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "one-shot", 1, Some(1), ArtifactType::Text);
    let user = signed_up_user(&mut p, "tanaka@example.com");

    submit_achievement(&mut p, &user, &text_submission("one-shot"), now()).unwrap();
    assert!(matches!(
        submit_achievement(&mut p, &user, &text_submission("one-shot"), now()).unwrap_err(),
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "max_achievement_count"
    ));
}

#[test]
fn test_unknown_artifact_type_is_rejected() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "poster", 1, None, ArtifactType::Text);
    let user = signed_up_user(&mut p, "tanaka@example.com");

    let request = SubmitAchievementRequest {
        mission_slug: "poster".to_string(),
        artifacts: vec![ArtifactInput {
            artifact_type: "VIDEO".to_string(),
            text_content: None,
            image_url: None,
            latitude: None,
            longitude: None,
        }],
    };
    assert!(matches!(
        submit_achievement(&mut p, &user, &request, now()).unwrap_err(),
        ApiError::InvalidInput { ref field, .. } if field == "artifact_type"
    ));
}

#[test]
fn test_invalid_image_url_is_rejected() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "photo", 1, None, ArtifactType::Image);
    let user = signed_up_user(&mut p, "tanaka@example.com");

    let request = SubmitAchievementRequest {
        mission_slug: "photo".to_string(),
        artifacts: vec![ArtifactInput {
            artifact_type: ArtifactType::Image.as_str().to_string(),
            text_content: None,
            image_url: Some("javascript:alert(1)".to_string()),
            latitude: None,
            longitude: None,
        }],
    };
    assert!(matches!(
        submit_achievement(&mut p, &user, &request, now()).unwrap_err(),
        ApiError::InvalidInput { ref field, .. } if field == "image_url"
    ));
}

#[test]
fn test_cancellation_is_owner_only() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "poster", 1, None, ArtifactType::Text);
    let owner = signed_up_user(&mut p, "owner@example.com");
    let other = signed_up_user(&mut p, "other@example.com");

    let response = submit_achievement(&mut p, &owner, &text_submission("poster"), now()).unwrap();

    assert!(matches!(
        cancel_achievement(&mut p, &other, response.achievement_id).unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
    cancel_achievement(&mut p, &owner, response.achievement_id).unwrap();
    assert!(matches!(
        cancel_achievement(&mut p, &owner, response.achievement_id).unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}
