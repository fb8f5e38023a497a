// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for API service tests.

use crate::auth::{AuthenticatedUser, sign_up};
use crate::request_response::SignUpRequest;
use action_board_domain::ArtifactType;
use action_board_persistence::{NewMission, NewSeason, Persistence};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn now() -> OffsetDateTime {
    datetime!(2026-06-15 00:00:00 UTC)
}

pub fn persistence() -> Persistence {
    let mut p: Persistence = Persistence::new_in_memory().expect("in-memory database");
    let season_id: i64 = p
        .create_season(&NewSeason {
            slug: "2026-summer".to_string(),
            name: "2026年夏".to_string(),
            start_date: "2026-06-01".to_string(),
            end_date: None,
            is_active: 0,
        })
        .expect("create season");
    p.set_active_season(season_id).expect("activate season");
    p
}

pub fn seed_mission(
    p: &mut Persistence,
    slug: &str,
    difficulty: i32,
    max_achievement_count: Option<i32>,
    required_artifact_type: ArtifactType,
) -> i64 {
    p.create_mission(&NewMission {
        slug: slug.to_string(),
        title: format!("Mission {slug}"),
        difficulty,
        max_achievement_count,
        required_artifact_type: required_artifact_type.as_str().to_string(),
        is_hidden: 0,
    })
    .expect("create mission")
}

pub fn sign_up_request(email: &str) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: "abcd1234".to_string(),
        name: "田中太郎".to_string(),
        date_of_birth: "2000-01-01".to_string(),
        address_prefecture: Some("東京都".to_string()),
        referral_code: None,
    }
}

pub fn signed_up_user(p: &mut Persistence, email: &str) -> AuthenticatedUser {
    let user_id: i64 = sign_up(p, &sign_up_request(email), now()).expect("sign up");
    let user = p.get_user_by_id(user_id).expect("lookup").expect("exists");
    AuthenticatedUser {
        user_id,
        name: user.name,
    }
}
