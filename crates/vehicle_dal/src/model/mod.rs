//! Domain models handed to callers of the data-access layer.
//!
//! # Responsibility
//! - Define the flattened, caller-facing shape of every stored entity.
//! - Expose fields by name so predicates can be evaluated in memory.
//! - Hold the write-time validation rules shared by repositories and services.
//!
//! # Invariants
//! - `id` is `0` until the store assigns one on insert; it never changes after.
//! - Denormalized fields (`VehicleModel::make_name`,
//!   `VehicleRegistration::{model_name, owner_name}`) are read-only from the
//!   caller's point of view.

use crate::query::FieldValue;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod engine_type;
mod make;
mod owner;
mod registration;
mod vehicle_model;

pub use engine_type::VehicleEngineType;
pub use make::VehicleMake;
pub use owner::VehicleOwner;
pub use registration::VehicleRegistration;
pub use vehicle_model::{ModelEngineType, VehicleModel};

/// Behaviour every domain model shares.
pub trait DomainModel {
    /// Store-assigned identity, `0` before insert.
    fn id(&self) -> i64;

    /// Value of a field addressed by its normalized name
    /// (see [`crate::query::normalize_field_name`]); `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Checks the rules a model must satisfy before it is written.
    fn validate(&self) -> Result<(), ModelValidationError>;
}

/// Write-time rule violation on a domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Text field is empty or whitespace, or an optional field is unset.
    Required(&'static str),
    /// Identifier or foreign key is zero or negative.
    NonPositive(&'static str),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "`{field}` is required"),
            Self::NonPositive(field) => write!(f, "`{field}` must be a positive id"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::Required(field));
    }
    Ok(())
}

pub(crate) fn require_positive(value: i64, field: &'static str) -> Result<(), ModelValidationError> {
    if value <= 0 {
        return Err(ModelValidationError::NonPositive(field));
    }
    Ok(())
}
