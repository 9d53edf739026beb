//! Use-case services over one unit of work.
//!
//! # Responsibility
//! - Normalize caller query options before they reach repositories.
//! - Enforce domain rules (required fields, natural-key uniqueness,
//!   referenced rows exist) and map failures to caller-facing kinds.
//! - Commit the unit of work after every successful write.
//!
//! # Invariants
//! - A rejected write undoes only its own statements; writes the caller
//!   left pending in the unit of work survive it.
//! - Services never talk to SQLite directly.

use crate::db::DbError;
use crate::repo::{RepoError, UnitOfWork};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod engine_type_service;
pub mod make_service;
pub mod model_service;
pub mod owner_service;
pub mod registration_service;

pub use engine_type_service::EngineTypeService;
pub use make_service::MakeService;
pub use model_service::ModelService;
pub use owner_service::OwnerService;
pub use registration_service::RegistrationService;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error category, e.g. for mapping to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before touching the store.
    Validation(String),
    /// Natural-key duplicate, or a delete blocked by dependent rows.
    Conflict(String),
    NotFound(String),
    /// Storage failure with no domain meaning.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::Conflict(message) | Self::NotFound(message) => {
                write!(f, "{message}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Validation(_) | Self::Conflict(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            RepoError::InvalidQuery(message) => Self::Validation(message),
            RepoError::Conflict(message) => Self::Conflict(message),
            RepoError::ForeignKey(message) => Self::Conflict(format!(
                "operation blocked by related records: {message}"
            )),
            RepoError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} with id {id} does not exist"))
            }
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::from(RepoError::from(value))
    }
}

pub(crate) fn require_id(id: i64, label: &str) -> ServiceResult<()> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!(
            "{label} id must be positive, got {id}"
        )));
    }
    Ok(())
}

pub(crate) fn require_text(value: &str, what: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{what} is required")));
    }
    Ok(())
}

pub(crate) fn missing(label: &str, id: i64) -> ServiceError {
    ServiceError::NotFound(format!("{label} with id {id} does not exist"))
}

pub(crate) fn no_match(label: &str) -> ServiceError {
    ServiceError::NotFound(format!("no {label} matches the given condition"))
}

/// Referenced row is absent: the caller sent a bad foreign key.
pub(crate) fn missing_reference(label: &str, id: i64) -> ServiceError {
    ServiceError::Validation(format!("{label} with id {id} does not exist"))
}

pub(crate) fn duplicate(label: &str, key: &str) -> ServiceError {
    ServiceError::Conflict(format!("{label} '{key}' already exists"))
}

/// Runs a write and commits it. On failure only the writes made by
/// `write` are undone; earlier pending work of the unit of work survives.
pub(crate) fn commit_with<T>(
    uow: &UnitOfWork,
    write: impl FnOnce() -> ServiceResult<T>,
) -> ServiceResult<T> {
    let value = uow.scoped(write)?;
    uow.save_changes()?;
    Ok(value)
}

/// Deletes through `delete` and commits only when a row was removed.
pub(crate) fn delete_with(
    uow: &UnitOfWork,
    delete: impl FnOnce() -> Result<bool, RepoError>,
) -> ServiceResult<bool> {
    let deleted = uow.scoped(|| delete().map_err(ServiceError::from))?;
    if deleted {
        uow.save_changes()?;
    }
    Ok(deleted)
}
