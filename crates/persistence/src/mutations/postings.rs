// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Posting event mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewPostingEvent;
use crate::diesel_schema::posting_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Record a leafleting/posting event and return its generated ID.
#[allow(dead_code)]
pub fn record_posting_event(
    conn: &mut _,
    new_event: &NewPostingEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(posting_events::table)
        .values(new_event)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}
