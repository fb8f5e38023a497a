// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Badge upsert semantics: insert / improve / unchanged, and the
//! idempotency guarantee the recomputation job relies on.

use super::helpers::{T0, persistence, seed_season, seed_user};
use crate::Persistence;
use crate::mutations::BadgeUpsertOutcome;
use action_board_domain::BadgeKind;

const T1: &str = "2026-06-16T00:00:00Z";

#[test]
fn test_new_badge_is_inserted_unnotified() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    let outcome: BadgeUpsertOutcome = p
        .upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 5, T0)
        .unwrap();
    assert_eq!(outcome, BadgeUpsertOutcome::Inserted);

    let badges = p.get_user_badges(user_id, season_id).unwrap();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].rank, 5);
    assert!(!badges[0].notified());
}

#[test]
fn test_same_snapshot_twice_is_a_no_op() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    let first: BadgeUpsertOutcome = p
        .upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 5, T0)
        .unwrap();
    assert!(first.wrote());

    // Notify the user, then re-run the identical snapshot.
    let badge_id: i64 = p.get_user_badges(user_id, season_id).unwrap()[0].badge_id;
    p.mark_badges_notified(&[badge_id], T0).unwrap();

    let second: BadgeUpsertOutcome = p
        .upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 5, T1)
        .unwrap();
    assert_eq!(second, BadgeUpsertOutcome::Unchanged);

    // The notified flag must not flip back.
    let badges = p.get_user_badges(user_id, season_id).unwrap();
    assert_eq!(badges.len(), 1);
    assert!(badges[0].notified());
}

#[test]
fn test_improved_rank_updates_and_resets_notification() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    p.upsert_badge(user_id, season_id, BadgeKind::Daily.as_str(), None, 20, T0)
        .unwrap();
    let badge_id: i64 = p.get_user_badges(user_id, season_id).unwrap()[0].badge_id;
    p.mark_badges_notified(&[badge_id], T0).unwrap();

    let outcome: BadgeUpsertOutcome = p
        .upsert_badge(user_id, season_id, BadgeKind::Daily.as_str(), None, 3, T1)
        .unwrap();
    assert_eq!(outcome, BadgeUpsertOutcome::Improved);

    let badges = p.get_user_badges(user_id, season_id).unwrap();
    assert_eq!(badges[0].rank, 3);
    assert!(!badges[0].notified());
    assert_eq!(badges[0].achieved_at, T1);
}

#[test]
fn test_worse_rank_is_not_written() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    p.upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 3, T0)
        .unwrap();
    let outcome: BadgeUpsertOutcome = p
        .upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 40, T1)
        .unwrap();
    assert_eq!(outcome, BadgeUpsertOutcome::Unchanged);

    let badges = p.get_user_badges(user_id, season_id).unwrap();
    assert_eq!(badges[0].rank, 3);
    assert_eq!(badges[0].achieved_at, T0);
}

#[test]
fn test_sub_types_are_separate_badges() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    p.upsert_badge(
        user_id,
        season_id,
        BadgeKind::Prefecture.as_str(),
        Some("東京都"),
        1,
        T0,
    )
    .unwrap();
    p.upsert_badge(
        user_id,
        season_id,
        BadgeKind::Prefecture.as_str(),
        Some("大阪府"),
        2,
        T0,
    )
    .unwrap();
    p.upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 9, T0)
        .unwrap();

    let badges = p.get_user_badges(user_id, season_id).unwrap();
    assert_eq!(badges.len(), 3);
}

#[test]
fn test_unnotified_badges_query() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let user_id: i64 = seed_user(&mut p, "田中", "tanaka@example.com", None);

    p.upsert_badge(user_id, season_id, BadgeKind::All.as_str(), None, 2, T0)
        .unwrap();
    p.upsert_badge(user_id, season_id, BadgeKind::Daily.as_str(), None, 7, T0)
        .unwrap();

    let unnotified = p.get_unnotified_badges(user_id).unwrap();
    assert_eq!(unnotified.len(), 2);

    let ids: Vec<i64> = unnotified.iter().map(|b| b.badge_id).collect();
    let marked: usize = p.mark_badges_notified(&ids, T0).unwrap();
    assert_eq!(marked, 2);
    assert!(p.get_unnotified_badges(user_id).unwrap().is_empty());
}
