// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific helpers.
//!
//! Everything that cannot be expressed in Diesel DSL (PRAGMA statements,
//! `last_insert_rowid()`) lives here so that `queries/` and `mutations/`
//! stay plain DSL.

pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Connection-level helpers the mutations rely on.
pub trait PersistenceBackend: Connection {
    /// Returns the identifier assigned by the most recent insert.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Confirms that referential integrity is enforced on this connection.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}
