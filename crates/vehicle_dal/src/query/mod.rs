//! Query vocabulary shared by repositories and services.
//!
//! # Responsibility
//! - Describe what a caller wants (`QueryOptions`, `Predicate`).
//! - Describe what comes back (`PagedResult`).
//!
//! This module never touches the store; repositories translate it to SQL.

pub mod options;
pub mod paging;
pub mod predicate;

pub use options::{FilterOptions, PagingOptions, QueryOptions, SortOptions};
pub use paging::{PagedResult, PagingError};
pub use predicate::{
    normalize_field_name, resolve, FieldKind, FieldMatch, FieldShortcut, FieldValue,
    NativeCondition, Predicate, Resolution, ResolutionTier,
};
