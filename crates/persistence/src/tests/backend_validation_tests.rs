// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB backend validation tests.
//!
//! These tests are `#[ignore]`d and never run automatically. They are
//! executed only via `cargo xtask test-mariadb`, which provisions a
//! MariaDB container and sets `DATABASE_URL` and
//! `ACTION_BOARD_TEST_BACKEND=mysql` before invoking them.

use crate::Persistence;
use crate::data_models::{NewSeason, NewUser};
use crate::mutations::BadgeUpsertOutcome;
use action_board_domain::BadgeKind;

fn mysql_persistence() -> Persistence {
    let backend: String =
        std::env::var("ACTION_BOARD_TEST_BACKEND").unwrap_or_else(|_| String::from("sqlite"));
    assert_eq!(
        backend, "mysql",
        "backend validation tests require ACTION_BOARD_TEST_BACKEND=mysql (run via cargo xtask test-mariadb)"
    );
    let url: String = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at the MariaDB validation container");
    Persistence::new_with_mysql(&url).expect("connect to MariaDB")
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mysql_user_round_trip() {
    let mut p: Persistence = mysql_persistence();

    let user_id: i64 = p
        .create_user(&NewUser {
            name: "検証ユーザー".to_string(),
            email: format!("validation+{}@example.com", std::process::id()),
            password_hash: "$2b$12$test-hash".to_string(),
            address_prefecture: Some("東京都".to_string()),
            avatar_url: None,
            date_of_birth: Some("1990-01-01".to_string()),
            referral_code: None,
            created_at: "2026-06-15T00:00:00Z".to_string(),
        })
        .unwrap();

    let user = p.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.address_prefecture.as_deref(), Some("東京都"));
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mysql_badge_upsert_is_idempotent() {
    let mut p: Persistence = mysql_persistence();

    let user_id: i64 = p
        .create_user(&NewUser {
            name: "バッジ検証".to_string(),
            email: format!("badge+{}@example.com", std::process::id()),
            password_hash: "$2b$12$test-hash".to_string(),
            address_prefecture: None,
            avatar_url: None,
            date_of_birth: None,
            referral_code: None,
            created_at: "2026-06-15T00:00:00Z".to_string(),
        })
        .unwrap();
    let season_id: i64 = p
        .create_season(&NewSeason {
            slug: format!("validation-{}", std::process::id()),
            name: "検証シーズン".to_string(),
            start_date: "2026-06-01".to_string(),
            end_date: None,
            is_active: 0,
        })
        .unwrap();

    let first: BadgeUpsertOutcome = p
        .upsert_badge(
            user_id,
            season_id,
            BadgeKind::All.as_str(),
            None,
            7,
            "2026-06-15T00:00:00Z",
        )
        .unwrap();
    assert_eq!(first, BadgeUpsertOutcome::Inserted);

    let second: BadgeUpsertOutcome = p
        .upsert_badge(
            user_id,
            season_id,
            BadgeKind::All.as_str(),
            None,
            7,
            "2026-06-16T00:00:00Z",
        )
        .unwrap();
    assert_eq!(second, BadgeUpsertOutcome::Unchanged);
}
