// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for persistence tests.

use crate::data_models::{NewMission, NewPosterBoard, NewSeason, NewUser};
use crate::Persistence;
use action_board_domain::{ArtifactType, BoardStatus};

pub const T0: &str = "2026-06-15T00:00:00Z";

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn seed_season(p: &mut Persistence, slug: &str) -> i64 {
    let season_id: i64 = p
        .create_season(&NewSeason {
            slug: slug.to_string(),
            name: format!("Season {slug}"),
            start_date: "2026-06-01".to_string(),
            end_date: None,
            is_active: 0,
        })
        .expect("create season");
    p.set_active_season(season_id).expect("activate season");
    season_id
}

pub fn seed_user(p: &mut Persistence, name: &str, email: &str, prefecture: Option<&str>) -> i64 {
    p.create_user(&NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$2b$12$test-hash".to_string(),
        address_prefecture: prefecture.map(ToString::to_string),
        avatar_url: None,
        date_of_birth: Some("1990-01-01".to_string()),
        referral_code: None,
        created_at: T0.to_string(),
    })
    .expect("create user")
}

pub fn seed_mission(p: &mut Persistence, slug: &str, difficulty: i32) -> i64 {
    p.create_mission(&NewMission {
        slug: slug.to_string(),
        title: format!("Mission {slug}"),
        difficulty,
        max_achievement_count: None,
        required_artifact_type: ArtifactType::None.as_str().to_string(),
        is_hidden: 0,
    })
    .expect("create mission")
}

pub fn seed_board(p: &mut Persistence, prefecture: &str) -> i64 {
    p.insert_boards(&[NewPosterBoard {
        prefecture: prefecture.to_string(),
        city: Some("千代田区".to_string()),
        name: Some("掲示板1".to_string()),
        address: None,
        number: Some("1-1".to_string()),
        latitude: 35.68,
        longitude: 139.76,
        status: BoardStatus::NotYet.code(),
    }])
    .expect("insert board");

    // Single-board seeding: the freshly inserted board is the newest.
    let boards = p
        .list_boards_by_prefecture(prefecture)
        .expect("list boards");
    boards.last().expect("seeded board").board_id
}
