// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod age;
mod badge;
mod board_status;
mod error;
mod format;
mod jst;
mod level;
mod masking;
mod prefecture;
mod season;
mod types;
mod url;

pub use age::{ADULT_AGE, calculate_age, parse_birth_date, validate_age};
pub use badge::{BadgeAssignment, BadgeCutoffs, BadgeKind, BadgeTier};
pub use board_status::BoardStatus;
pub use error::DomainError;
pub use format::format_amount;
pub use jst::{JstDayWindow, previous_jst_day};
pub use level::{
    MAX_LEVEL, calculate_level, level_progress, mission_xp, total_xp, xp_delta, xp_to_next_level,
};
pub use masking::mask_username;
pub use prefecture::{PREFECTURES, is_prefecture};
pub use season::Season;
pub use types::{ArtifactType, XpSource};
pub use url::{is_valid_url, validate_return_url};
