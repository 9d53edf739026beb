//! One connection plus its pending-write state, shared by the repositories
//! of a single unit of work.
//!
//! # Invariants
//! - The first write opens an immediate transaction; reads on the same
//!   session see those writes before they are committed.
//! - A write that opens the transaction and then fails or changes nothing
//!   closes it again; earlier pending writes are never discarded by it.
//! - `commit`/`rollback` reset the pending row counter.
//! - `close` releases the connection at most once. Any access afterwards
//!   fails with [`DbError::SessionClosed`].

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::cell::{Cell, RefCell};
use std::time::Instant;

const SCOPE_SAVEPOINT: &str = "uow_scope";

pub struct DbSession {
    conn: RefCell<Option<Connection>>,
    pending_rows: Cell<usize>,
}

impl DbSession {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: RefCell::new(Some(conn)),
            pending_rows: Cell::new(0),
        }
    }

    /// Runs a read-only closure against the live connection.
    pub fn read<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let guard = self.conn.borrow();
        let conn = guard.as_ref().ok_or(DbError::SessionClosed)?;
        f(conn)
    }

    /// Runs a mutating closure inside the pending transaction.
    ///
    /// The closure returns the number of rows it changed; that count is
    /// added to the pending total reported by [`DbSession::commit`]. When
    /// this call opened the transaction and the closure fails or changes
    /// nothing, the transaction is rolled back again so no lock is held.
    pub fn write<E>(&self, f: impl FnOnce(&Connection) -> Result<usize, E>) -> Result<usize, E>
    where
        E: From<DbError>,
    {
        let guard = self.conn.borrow();
        let conn = guard.as_ref().ok_or(DbError::SessionClosed)?;
        let opened = conn.is_autocommit();
        if opened {
            conn.execute_batch("BEGIN IMMEDIATE;")
                .map_err(DbError::from)?;
        }

        match f(conn) {
            Ok(0) if opened => {
                end_opened_transaction(conn);
                Ok(0)
            }
            Ok(changed) => {
                self.pending_rows.set(self.pending_rows.get() + changed);
                Ok(changed)
            }
            Err(err) => {
                if opened {
                    end_opened_transaction(conn);
                }
                Err(err)
            }
        }
    }

    /// Runs `f` so that a failure undoes only the writes `f` made.
    ///
    /// Writes pending before the call survive: they are protected by a
    /// savepoint. Without earlier pending writes the whole transaction
    /// belongs to `f` and is rolled back on failure.
    pub fn scoped<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let had_pending = self.has_pending_changes();
        if had_pending {
            self.execute(&format!("SAVEPOINT {SCOPE_SAVEPOINT};"))?;
        }
        let rows_before = self.pending_rows.get();

        match f() {
            Ok(value) => {
                if had_pending {
                    self.execute(&format!("RELEASE {SCOPE_SAVEPOINT};"))?;
                }
                Ok(value)
            }
            Err(err) => {
                if had_pending {
                    self.execute(&format!(
                        "ROLLBACK TO {SCOPE_SAVEPOINT}; RELEASE {SCOPE_SAVEPOINT};"
                    ))?;
                    self.pending_rows.set(rows_before);
                    info!(
                        "event=uow_rollback module=db status=ok scope=savepoint rows={}",
                        rows_before
                    );
                } else if self.has_pending_changes() {
                    self.rollback()?;
                }
                Err(err)
            }
        }
    }

    fn execute(&self, sql: &str) -> DbResult<()> {
        let guard = self.conn.borrow();
        let conn = guard.as_ref().ok_or(DbError::SessionClosed)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Whether a transaction with uncommitted writes is open.
    pub fn has_pending_changes(&self) -> bool {
        self.conn
            .borrow()
            .as_ref()
            .is_some_and(|conn| !conn.is_autocommit())
    }

    /// Commits the pending transaction; returns rows written since the last
    /// commit.
    pub fn commit(&self) -> DbResult<usize> {
        let started_at = Instant::now();
        let guard = self.conn.borrow();
        let conn = guard.as_ref().ok_or(DbError::SessionClosed)?;
        if !conn.is_autocommit() {
            if let Err(err) = conn.execute_batch("COMMIT;") {
                error!(
                    "event=uow_commit module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        }
        let rows = self.pending_rows.replace(0);
        info!(
            "event=uow_commit module=db status=ok rows={} duration_ms={}",
            rows,
            started_at.elapsed().as_millis()
        );
        Ok(rows)
    }

    /// Discards the pending transaction; returns the rows thrown away.
    pub fn rollback(&self) -> DbResult<usize> {
        let guard = self.conn.borrow();
        let conn = guard.as_ref().ok_or(DbError::SessionClosed)?;
        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK;")?;
        }
        let rows = self.pending_rows.replace(0);
        info!("event=uow_rollback module=db status=ok rows={rows}");
        Ok(rows)
    }

    /// Releases the connection. Returns `false` when it was already closed.
    ///
    /// Uncommitted writes are rolled back before the handle is dropped.
    pub fn close(&self) -> DbResult<bool> {
        let Some(conn) = self.conn.borrow_mut().take() else {
            return Ok(false);
        };

        let discarded = self.pending_rows.replace(0);
        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK;")?;
        }
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=uow_dispose module=db status=ok discarded_rows={discarded}");
        Ok(true)
    }

    pub fn is_closed(&self) -> bool {
        self.conn.borrow().is_none()
    }
}

/// Rolls back a transaction that the failed or empty write itself opened.
fn end_opened_transaction(conn: &Connection) {
    if let Err(err) = conn.execute_batch("ROLLBACK;") {
        error!("event=uow_rollback module=db status=error scope=write error={err}");
    }
}
