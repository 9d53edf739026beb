//! Repository layer: the generic engine plus one schema per entity.
//!
//! # Responsibility
//! - Define the uniform `Repository` contract used by services.
//! - Isolate SQL details (columns, filters, sort keys) from orchestration.
//! - Group repositories sharing one session into a `UnitOfWork`.
//!
//! # Invariants
//! - Repository writes enforce `DomainModel::validate()` before persistence.
//! - Store constraint violations surface as semantic errors (`Conflict`,
//!   `ForeignKey`) rather than raw SQLite errors.

use crate::db::DbError;
use crate::model::ModelValidationError;
use crate::query::PagingError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod engine_type_repo;
pub mod generic_repo;
pub mod make_repo;
pub mod model_engine_type_repo;
pub mod model_repo;
pub mod owner_repo;
pub mod registration_repo;
pub mod scope;
pub mod unit_of_work;

pub use engine_type_repo::EngineTypeRepository;
pub use generic_repo::{EntitySchema, Repository, SqliteRepository};
pub use make_repo::MakeRepository;
pub use model_engine_type_repo::ModelEngineTypeRepository;
pub use model_repo::ModelRepository;
pub use owner_repo::OwnerRepository;
pub use registration_repo::RegistrationRepository;
pub use scope::QueryScope;
pub use unit_of_work::UnitOfWork;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Validation(ModelValidationError),
    /// Malformed query options (paging out of range, unparsable filter).
    InvalidQuery(String),
    /// Unique constraint violated.
    Conflict(String),
    /// Foreign-key constraint violated on insert, update or delete.
    ForeignKey(String),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidQuery(message) => write!(f, "invalid query: {message}"),
            Self::Conflict(message) => write!(f, "unique constraint violated: {message}"),
            Self::ForeignKey(message) => write!(f, "foreign key constraint violated: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidQuery(_)
            | Self::Conflict(_)
            | Self::ForeignKey(_)
            | Self::NotFound { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PagingError> for RepoError {
    fn from(value: PagingError) -> Self {
        Self::InvalidQuery(value.to_string())
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            let detail = message
                .clone()
                .unwrap_or_else(|| failure.to_string());
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::Conflict(detail);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKey(detail),
                _ => {}
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}
