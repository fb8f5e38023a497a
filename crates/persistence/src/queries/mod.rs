// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query operations.
//!
//! Every function here is generated per-backend by the `backend_fn!`
//! macro in the crate root and uses Diesel DSL exclusively.

pub mod badges;
pub mod boards;
pub mod levels;
pub mod missions;
pub mod ranking;
pub mod referral;
pub mod seasons;
pub mod sessions;
pub mod users;
