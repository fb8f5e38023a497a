// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Referral validation queries.
//!
//! Both checks are pure lookups with boolean results. Referral
//! artifacts store the invitee's email lowercased, and the duplicate
//! check lowercases both sides; no further normalization is applied.

use crate::diesel_schema::{mission_artifacts, users};
use crate::error::PersistenceError;
use action_board_domain::ArtifactType;
use diesel::define_sql_function;
use diesel::prelude::*;
use diesel::sql_types::Nullable;
use diesel::{MysqlConnection, SqliteConnection};

define_sql_function! {
    /// SQL LOWER(), available on both backends.
    fn lower(input: Nullable<diesel::sql_types::Text>) -> Nullable<diesel::sql_types::Text>;
}

backend_fn! {

/// Whether a referral code belongs to a non-deleted user.
#[allow(dead_code)]
pub fn is_valid_referral_code(
    conn: &mut _,
    referral_code: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = users::table
        .filter(users::referral_code.eq(referral_code))
        .filter(users::deleted_at.is_null())
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

}

backend_fn! {

/// Whether an email was already used in a referral artifact.
///
/// Case-insensitive match against the stored text content of REFERRAL
/// artifacts. Blocks duplicate referral submissions from the same
/// email without requiring the invitee to have an account.
#[allow(dead_code)]
pub fn is_email_already_used_in_referral(
    conn: &mut _,
    email: &str,
) -> Result<bool, PersistenceError> {
    let needle: String = email.to_lowercase();
    let count: i64 = mission_artifacts::table
        .filter(mission_artifacts::artifact_type.eq(ArtifactType::Referral.as_str()))
        .filter(lower(mission_artifacts::text_content).eq(Some(needle)))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

}
