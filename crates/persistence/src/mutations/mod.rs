// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations.
//!
//! Every function here is generated per-backend by the `backend_fn!`
//! macro in the crate root. Multi-step writes run inside a single
//! Diesel transaction.

pub mod achievements;
pub mod badges;
pub mod boards;
pub mod levels;
pub mod missions;
pub mod postings;
pub mod seasons;
pub mod sessions;
pub mod users;

pub use badges::BadgeUpsertOutcome;
pub use boards::BoardStatusUpdate;
