// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! XP and level calculation.
//!
//! This module provides pure, deterministic mappings between cumulative
//! XP and user levels. The curve is a monotonically increasing step
//! function: reaching level `L + 1` from level `L` requires
//! `40 + 15 * (L - 1)` additional XP.

use crate::error::DomainError;

/// Hard cap on the computed level.
///
/// Keeps the level lookup bounded for arbitrarily large XP values.
pub const MAX_LEVEL: u32 = 1000;

/// XP required to advance from `level` to `level + 1`.
///
/// # Arguments
///
/// * `level` - The current level (1-based)
///
/// # Errors
///
/// Returns an error if `level` is 0.
pub const fn xp_delta(level: u32) -> Result<i64, DomainError> {
    if level < 1 {
        return Err(DomainError::InvalidLevel("Level must be at least 1"));
    }
    Ok(xp_delta_unchecked(level))
}

/// Cumulative XP at which `level` is reached.
///
/// The closed form of summing `xp_delta` over levels `1..level`:
/// `(level - 1) * (50 + 15 * level) / 2`, which is integer-exact for
/// every level.
///
/// # Arguments
///
/// * `level` - The target level (1-based)
///
/// # Errors
///
/// Returns an error if `level` is 0.
pub const fn total_xp(level: u32) -> Result<i64, DomainError> {
    if level < 1 {
        return Err(DomainError::InvalidLevel("Level must be at least 1"));
    }
    Ok(total_xp_unchecked(level))
}

/// Computes the level for a cumulative XP value.
///
/// The level is the largest `L` (capped at [`MAX_LEVEL`]) such that the
/// threshold for `L + 1` has not yet been reached. Negative XP maps to
/// level 1, and the result is non-decreasing in `xp`.
///
/// # Arguments
///
/// * `xp` - The cumulative XP value
#[must_use]
pub const fn calculate_level(xp: i64) -> u32 {
    if xp < 0 {
        return 1;
    }

    let mut level: u32 = 1;
    while level <= MAX_LEVEL {
        if xp < total_xp_unchecked(level + 1) {
            return level;
        }
        level += 1;
    }

    MAX_LEVEL
}

/// XP granted for completing a mission of the given difficulty.
///
/// Unknown difficulties fall back to the easiest reward.
///
/// # Arguments
///
/// * `difficulty` - The mission difficulty (1-4)
#[must_use]
pub const fn mission_xp(difficulty: i32) -> i64 {
    match difficulty {
        2 => 100,
        3 => 200,
        4 => 400,
        _ => 50,
    }
}

/// XP still required to reach the next level from the given XP value.
///
/// # Arguments
///
/// * `xp` - The cumulative XP value
#[must_use]
pub const fn xp_to_next_level(xp: i64) -> i64 {
    let level: u32 = calculate_level(xp);
    let next_threshold: i64 = total_xp_unchecked(level + 1);
    let remaining: i64 = next_threshold - xp;
    if remaining < 0 { 0 } else { remaining }
}

/// Progress through the current level as a fraction in `[0, 1]`.
///
/// # Arguments
///
/// * `xp` - The cumulative XP value
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn level_progress(xp: i64) -> f64 {
    let level: u32 = calculate_level(xp);
    let range: i64 = xp_delta_unchecked(level);
    let remaining: i64 = xp_to_next_level(xp);
    let progress: f64 = (range - remaining) as f64 / range as f64;
    progress.clamp(0.0, 1.0)
}

const fn xp_delta_unchecked(level: u32) -> i64 {
    40 + 15 * (level as i64 - 1)
}

const fn total_xp_unchecked(level: u32) -> i64 {
    let level: i64 = level as i64;
    (level - 1) * (50 + 15 * level) / 2
}
