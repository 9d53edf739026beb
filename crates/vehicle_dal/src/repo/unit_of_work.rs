//! Unit of work: one session shared by every entity repository.
//!
//! # Responsibility
//! - Own the connection for the lifetime of one logical operation.
//! - Hand out the six repositories, all bound to that same connection.
//! - Commit (`save_changes`) or discard pending writes atomically.
//!
//! # Invariants
//! - Repositories are built once, in the constructor, and never replaced.
//! - After `dispose` every repository call fails with `SessionClosed`;
//!   `dispose` itself may be called any number of times.

use super::{
    EngineTypeRepository, MakeRepository, ModelEngineTypeRepository, ModelRepository,
    OwnerRepository, RegistrationRepository,
};
use crate::config::DalConfig;
use crate::db::{
    open_db, open_db_in_memory, DbError, DbResult, DbSession, DEFAULT_BUSY_TIMEOUT,
};
use rusqlite::Connection;
use std::path::Path;
use std::rc::Rc;

pub struct UnitOfWork {
    session: Rc<DbSession>,
    makes: MakeRepository,
    models: ModelRepository,
    engine_types: EngineTypeRepository,
    owners: OwnerRepository,
    registrations: RegistrationRepository,
    model_engine_types: ModelEngineTypeRepository,
}

impl UnitOfWork {
    /// Wraps an already bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        let session = Rc::new(DbSession::new(conn));
        Self {
            makes: MakeRepository::new(Rc::clone(&session)),
            models: ModelRepository::new(Rc::clone(&session)),
            engine_types: EngineTypeRepository::new(Rc::clone(&session)),
            owners: OwnerRepository::new(Rc::clone(&session)),
            registrations: RegistrationRepository::new(Rc::clone(&session)),
            model_engine_types: ModelEngineTypeRepository::new(Rc::clone(&session)),
            session,
        }
    }

    /// Opens (creating if needed) and migrates a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path, DEFAULT_BUSY_TIMEOUT)?))
    }

    /// Fresh private in-memory database, mainly for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Opens the database described by `config`; no path means in-memory.
    pub fn from_config(config: &DalConfig) -> DbResult<Self> {
        let conn = match &config.database.path {
            Some(path) => open_db(path, config.database.busy_timeout())?,
            None => open_db_in_memory()?,
        };
        Ok(Self::new(conn))
    }

    pub fn makes(&self) -> &MakeRepository {
        &self.makes
    }

    pub fn models(&self) -> &ModelRepository {
        &self.models
    }

    pub fn engine_types(&self) -> &EngineTypeRepository {
        &self.engine_types
    }

    pub fn owners(&self) -> &OwnerRepository {
        &self.owners
    }

    pub fn registrations(&self) -> &RegistrationRepository {
        &self.registrations
    }

    pub fn model_engine_types(&self) -> &ModelEngineTypeRepository {
        &self.model_engine_types
    }

    /// Commits every pending write.
    ///
    /// Returns the number of rows written since the last commit; rows
    /// removed by cascading deletes are not counted.
    pub fn save_changes(&self) -> DbResult<usize> {
        self.session.commit()
    }

    /// Rolls back every pending write; returns the rows discarded.
    pub fn discard_changes(&self) -> DbResult<usize> {
        self.session.rollback()
    }

    /// Runs `f` so that its failure rolls back only the writes it made.
    pub(crate) fn scoped<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        self.session.scoped(f)
    }

    pub fn has_pending_changes(&self) -> bool {
        self.session.has_pending_changes()
    }

    /// Releases the connection. Returns `false` if it was already released.
    pub fn dispose(&self) -> DbResult<bool> {
        self.session.close()
    }

    pub fn is_disposed(&self) -> bool {
        self.session.is_closed()
    }
}
