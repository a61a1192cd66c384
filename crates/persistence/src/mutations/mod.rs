// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `employees`: employee inserts and field updates
//! - `vacations`: vacation inserts and guarded status updates
//! - `transition`: atomic persistence of a `TransitionResult`

pub mod employees;
pub mod transition;
pub mod vacations;

pub use transition::{PersistTransitionResult, persist_transition};
