// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ranking snapshot queries.

use super::helpers::{T0, persistence, seed_mission, seed_season, seed_user};
use crate::Persistence;
use crate::data_models::{NewAchievement, RankingEntry};
use action_board_domain::{XpSource, mission_xp};

const IN_WINDOW: &str = "2026-06-14T10:00:00Z";
const BEFORE_WINDOW: &str = "2026-06-13T10:00:00Z";
const WINDOW_START: &str = "2026-06-14T00:00:00Z";
const WINDOW_END: &str = "2026-06-15T00:00:00Z";

fn grant(p: &mut Persistence, user_id: i64, season_id: i64, xp: i64, at: &str) {
    p.grant_xp(
        user_id,
        season_id,
        xp,
        XpSource::Bonus.as_str(),
        None,
        "ボーナス",
        at,
    )
    .unwrap();
}

#[test]
fn test_overall_ranking_orders_by_xp() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let low: i64 = seed_user(&mut p, "低", "low@example.com", None);
    let high: i64 = seed_user(&mut p, "高", "high@example.com", None);
    let mid: i64 = seed_user(&mut p, "中", "mid@example.com", None);

    grant(&mut p, low, season_id, 10, T0);
    grant(&mut p, high, season_id, 300, T0);
    grant(&mut p, mid, season_id, 100, T0);

    let ranking: Vec<RankingEntry> = p.overall_ranking(season_id, 100).unwrap();
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].user_id, high);
    assert_eq!(ranking[0].rank, 1);
    assert_eq!(ranking[1].user_id, mid);
    assert_eq!(ranking[1].rank, 2);
    assert_eq!(ranking[2].user_id, low);
    assert_eq!(ranking[2].rank, 3);
}

#[test]
fn test_overall_ranking_respects_limit_and_skips_deleted() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let keep: i64 = seed_user(&mut p, "残留", "keep@example.com", None);
    let gone: i64 = seed_user(&mut p, "退会", "gone@example.com", None);

    grant(&mut p, keep, season_id, 50, T0);
    grant(&mut p, gone, season_id, 500, T0);

    p.delete_account(gone, T0).unwrap();

    let ranking: Vec<RankingEntry> = p.overall_ranking(season_id, 1).unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].user_id, keep);
}

#[test]
fn test_prefecture_ranking_filters_by_prefecture() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let tokyo: i64 = seed_user(&mut p, "都民", "tokyo@example.com", Some("東京都"));
    let osaka: i64 = seed_user(&mut p, "府民", "osaka@example.com", Some("大阪府"));

    grant(&mut p, tokyo, season_id, 10, T0);
    grant(&mut p, osaka, season_id, 999, T0);

    let ranking: Vec<RankingEntry> = p.prefecture_ranking(season_id, "東京都", 100).unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].user_id, tokyo);
    assert_eq!(ranking[0].rank, 1);
}

#[test]
fn test_period_ranking_sums_only_inside_window() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let steady: i64 = seed_user(&mut p, "継続", "steady@example.com", None);
    let early: i64 = seed_user(&mut p, "早期", "early@example.com", None);

    // `steady` earns inside the window, `early` only before it.
    grant(&mut p, steady, season_id, 60, IN_WINDOW);
    grant(&mut p, steady, season_id, 40, IN_WINDOW);
    grant(&mut p, early, season_id, 500, BEFORE_WINDOW);

    let ranking: Vec<RankingEntry> = p
        .period_ranking(season_id, WINDOW_START, WINDOW_END, 100)
        .unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].user_id, steady);
    assert_eq!(ranking[0].xp, 100);
}

#[test]
fn test_mission_ranking_scores_by_achievement_count() {
    let mut p: Persistence = persistence();
    let season_id: i64 = seed_season(&mut p, "s1");
    let mission_id: i64 = seed_mission(&mut p, "posting", 2);
    let busy: i64 = seed_user(&mut p, "多忙", "busy@example.com", None);
    let casual: i64 = seed_user(&mut p, "気楽", "casual@example.com", None);

    for user_id in [busy, casual] {
        p.initialize_user_level(user_id, season_id, T0).unwrap();
    }

    for _ in 0..3 {
        p.insert_achievement(
            &NewAchievement {
                user_id: busy,
                mission_id,
                season_id,
                created_at: T0.to_string(),
            },
            &[],
        )
        .unwrap();
    }
    p.insert_achievement(
        &NewAchievement {
            user_id: casual,
            mission_id,
            season_id,
            created_at: T0.to_string(),
        },
        &[],
    )
    .unwrap();

    let per_achievement: i64 = mission_xp(2);
    let ranking: Vec<RankingEntry> = p
        .mission_ranking(season_id, mission_id, per_achievement, 100)
        .unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].user_id, busy);
    assert_eq!(ranking[0].xp, 3 * per_achievement);
    assert_eq!(ranking[1].user_id, casual);
    assert_eq!(ranking[1].xp, per_achievement);
}
