// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary layer for Action Board.
//!
//! Handlers here sit between the HTTP surface and the persistence
//! adapter: they validate input, enforce authentication, run the
//! domain calculations, and translate lower-level errors into the API
//! error taxonomy. The persistence adapter is always injected by the
//! caller; this crate never constructs or owns a database connection.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

mod achievements;
mod auth;
mod badges;
mod boards;
mod csv_import;
mod error;
mod levels;
mod password_policy;
mod postings;
mod rankings;
mod referral;
mod request_response;

#[cfg(test)]
mod tests;

pub use achievements::{cancel_achievement, submit_achievement};
pub use auth::{
    AuthenticatedUser, AuthenticationService, SESSION_TTL_HOURS, delete_account, sign_up,
};
pub use badges::{
    BadgeCalculationSummary, CategoryResult, calculate_all_badges, get_unnotified_badges,
    get_user_badges, mark_badges_notified,
};
pub use boards::{board_history, board_status_counts, import_boards_csv, update_board_status};
pub use csv_import::{CsvImportError, parse_boards_csv};
pub use error::{ApiError, ApiResult, translate_domain_error, translate_persistence_error};
pub use levels::{get_user_level_view, get_user_xp_history};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use postings::record_posting;
pub use rankings::{RankingScope, get_ranking};
pub use referral::process_referral;
pub use request_response::{
    ArtifactInput, BadgeView, BoardHistoryEntry, BoardStatusCountsResponse, LevelView,
    RankingResponse, SignUpRequest, SubmitAchievementRequest, SubmitAchievementResponse,
    UpdateBoardStatusRequest, UpdateBoardStatusResponse,
};
