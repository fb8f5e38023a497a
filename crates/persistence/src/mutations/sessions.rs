// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewSession;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a new session and return the generated `session_id`.
#[allow(dead_code)]
pub fn create_session(conn: &mut _, new_session: &NewSession) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values(new_session)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Update the last activity timestamp for a session.
#[allow(dead_code)]
pub fn update_session_activity(
    conn: &mut _,
    session_id: i64,
    last_activity_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(last_activity_at))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Delete a session by token.
#[allow(dead_code)]
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Delete all sessions that expired before `now`.
///
/// Returns the number of sessions removed.
#[allow(dead_code)]
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now)))
            .execute(conn)?,
    )
}

}

backend_fn! {

/// Delete all sessions belonging to a user.
#[allow(dead_code)]
pub fn delete_sessions_for_user(conn: &mut _, user_id: i64) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::user_id.eq(user_id)))
            .execute(conn)?,
    )
}

}
