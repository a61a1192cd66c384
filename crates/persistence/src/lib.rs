// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for employees and vacation requests.
//!
//! Built on Diesel with `SQLite`. The schema is created by embedded
//! migrations when a connection is opened.
//!
//! ## Writes
//!
//! The only way to change stored state is [`Persistence::persist_transition`],
//! which writes a `TransitionResult` produced by the core crate inside one
//! immediate transaction. Status updates are guarded by the status the
//! transition was computed from, and new vacations are re-checked for
//! overlap while the write lock is held.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] returns an isolated shared-cache in-memory
//! database per call, so tests never observe each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use ferias::TransitionResult;
use ferias_domain::{Employee, Vacation};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::VacationStats;
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

use backend::PersistenceBackend;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:ferias_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist and switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition result atomically.
    ///
    /// # Errors
    ///
    /// Returns `OverlappingVacation`, `StaleStatus` or `DuplicateEmail` when
    /// the store has moved on since the transition was computed, or a
    /// database error. Nothing is written on error.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Loads an employee with their complete vacation history.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::find_employee(&mut self.conn, employee_id)
    }

    /// Lists all employees ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::list_employees(&mut self.conn)
    }

    // ========================================================================
    // Vacations
    // ========================================================================

    /// Retrieves a vacation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_vacation(&mut self, vacation_id: i64) -> Result<Option<Vacation>, PersistenceError> {
        queries::get_vacation(&mut self.conn, vacation_id)
    }

    /// Lists all vacations, most recently requested first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vacations(&mut self) -> Result<Vec<Vacation>, PersistenceError> {
        queries::list_vacations(&mut self.conn)
    }

    /// Lists one employee's vacations, most recently requested first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vacations_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<Vacation>, PersistenceError> {
        queries::list_vacations_for_employee(&mut self.conn, employee_id)
    }

    /// Lists approved vacations that start in, end in, or span `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_approved_vacations_in_range(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<Vacation>, PersistenceError> {
        queries::list_approved_vacations_in_range(&mut self.conn, start, end)
    }

    /// Counts vacations by status, plus approved vacations starting in
    /// `[today, upcoming_until]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn vacation_stats(
        &mut self,
        today: Date,
        upcoming_until: Date,
    ) -> Result<VacationStats, PersistenceError> {
        queries::vacation_stats(&mut self.conn, today, upcoming_until)
    }
}
