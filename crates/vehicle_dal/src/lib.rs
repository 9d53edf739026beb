//! Data-access layer for a vehicle registry: makes, models, engine types,
//! owners and registrations stored in SQLite.
//!
//! Callers normally open a [`UnitOfWork`], wrap it in the per-entity
//! services and let those commit after each write.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DalConfig};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::{
    DomainModel, ModelEngineType, ModelValidationError, VehicleEngineType, VehicleMake,
    VehicleModel, VehicleOwner, VehicleRegistration,
};
pub use query::{
    FieldMatch, FieldValue, FilterOptions, PagedResult, PagingOptions, Predicate, QueryOptions,
    ResolutionTier, SortOptions,
};
pub use repo::{RepoError, RepoResult, Repository, UnitOfWork};
pub use service::{
    EngineTypeService, ErrorKind, MakeService, ModelService, OwnerService, RegistrationService,
    ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
