// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User query operations.

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Look up a user by ID.
#[allow(dead_code)]
pub fn get_user_by_id(conn: &mut _, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
    users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_by_id: {e}")))
}

}

backend_fn! {

/// Look up a non-deleted user by email.
#[allow(dead_code)]
pub fn get_user_by_email(
    conn: &mut _,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    users::table
        .filter(users::email.eq(email))
        .filter(users::deleted_at.is_null())
        .first::<UserData>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_by_email: {e}")))
}

}

backend_fn! {

/// Look up the non-deleted owner of a referral code.
#[allow(dead_code)]
pub fn find_user_by_referral_code(
    conn: &mut _,
    referral_code: &str,
) -> Result<Option<UserData>, PersistenceError> {
    users::table
        .filter(users::referral_code.eq(referral_code))
        .filter(users::deleted_at.is_null())
        .first::<UserData>(conn)
        .optional()
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("find_user_by_referral_code: {e}"))
        })
}

}
