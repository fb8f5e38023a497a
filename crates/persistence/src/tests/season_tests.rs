// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season activation and the single-active-season invariant.

use super::helpers::persistence;
use crate::Persistence;
use crate::data_models::NewSeason;
use crate::error::PersistenceError;

fn make_season(slug: &str) -> NewSeason {
    NewSeason {
        slug: slug.to_string(),
        name: format!("Season {slug}"),
        start_date: "2026-06-01".to_string(),
        end_date: None,
        is_active: 0,
    }
}

#[test]
fn test_no_active_season_is_an_error() {
    let mut p: Persistence = persistence();
    assert_eq!(
        p.get_active_season().unwrap_err(),
        PersistenceError::NoActiveSeason
    );
}

#[test]
fn test_activation_is_exclusive() {
    let mut p: Persistence = persistence();
    let first: i64 = p.create_season(&make_season("2026-spring")).unwrap();
    let second: i64 = p.create_season(&make_season("2026-summer")).unwrap();

    p.set_active_season(first).unwrap();
    assert_eq!(p.get_active_season().unwrap().season_id, first);

    p.set_active_season(second).unwrap();
    let active = p.get_active_season().unwrap();
    assert_eq!(active.season_id, second);

    // Exactly one season may report active.
    let active_count: usize = p
        .list_seasons()
        .unwrap()
        .iter()
        .filter(|s| s.active())
        .count();
    assert_eq!(active_count, 1);
}

#[test]
fn test_activating_missing_season_fails() {
    let mut p: Persistence = persistence();
    assert!(matches!(
        p.set_active_season(42).unwrap_err(),
        PersistenceError::SeasonNotFound(_)
    ));
}

#[test]
fn test_get_season_by_slug() {
    let mut p: Persistence = persistence();
    let season_id: i64 = p.create_season(&make_season("2026-summer")).unwrap();

    let found = p.get_season_by_slug("2026-summer").unwrap().unwrap();
    assert_eq!(found.season_id, season_id);
    assert!(p.get_season_by_slug("1999-winter").unwrap().is_none());
}
