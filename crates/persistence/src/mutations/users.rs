// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewUser;
use crate::diesel_schema::{
    achievements, mission_artifacts, posting_events, sessions, user_badges, user_levels, users,
    xp_transactions,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new user and return the generated `user_id`.
#[allow(dead_code)]
pub fn create_user(conn: &mut _, new_user: &NewUser) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values(new_user)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Update the mutable profile fields of a user.
#[allow(dead_code)]
pub fn update_profile(
    conn: &mut _,
    user_id: i64,
    name: &str,
    address_prefecture: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::name.eq(name),
            users::address_prefecture.eq(address_prefecture),
            users::avatar_url.eq(avatar_url),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }
    Ok(())
}

}

backend_fn! {

/// Set a user's referral code.
#[allow(dead_code)]
pub fn set_referral_code(
    conn: &mut _,
    user_id: i64,
    referral_code: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(users::referral_code.eq(referral_code))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }
    Ok(())
}

}

backend_fn! {

/// Soft-delete a user account and hard-delete its owned rows.
///
/// The user row itself survives with `deleted_at` set (the referral
/// code validator checks this flag); levels, transactions, badges,
/// achievements, artifacts, posting events, and sessions are removed
/// in one transaction.
#[allow(dead_code)]
pub fn delete_account(
    conn: &mut _,
    user_id: i64,
    deleted_at: &str,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: i64 = users::table
            .filter(users::user_id.eq(user_id))
            .filter(users::deleted_at.is_null())
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::UserNotFound(user_id));
        }

        diesel::delete(
            mission_artifacts::table.filter(mission_artifacts::user_id.eq(user_id)),
        )
        .execute(conn)?;
        diesel::delete(achievements::table.filter(achievements::user_id.eq(user_id)))
            .execute(conn)?;
        diesel::delete(user_levels::table.filter(user_levels::user_id.eq(user_id)))
            .execute(conn)?;
        diesel::delete(xp_transactions::table.filter(xp_transactions::user_id.eq(user_id)))
            .execute(conn)?;
        diesel::delete(user_badges::table.filter(user_badges::user_id.eq(user_id)))
            .execute(conn)?;
        diesel::delete(posting_events::table.filter(posting_events::user_id.eq(user_id)))
            .execute(conn)?;
        diesel::delete(sessions::table.filter(sessions::user_id.eq(user_id))).execute(conn)?;

        diesel::update(users::table.filter(users::user_id.eq(user_id)))
            .set(users::deleted_at.eq(deleted_at))
            .execute(conn)?;

        Ok(())
    })
}

}
