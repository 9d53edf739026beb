//! Registration storage schema.
//!
//! `model_name` and `owner_name` are ordinary columns written from the
//! model; the registration service fills them before add/update.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::scope::QueryScope;
use super::RepoResult;
use crate::model::VehicleRegistration;
use crate::query::{FieldKind, FieldShortcut, FilterOptions};
use rusqlite::types::Value;
use rusqlite::Row;

/// Row of `registrations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEntity {
    pub id: i64,
    pub registration_number: String,
    pub model_id: i64,
    pub owner_id: i64,
    pub model_engine_type_id: i64,
    pub model_name: String,
    pub owner_name: String,
}

impl From<&VehicleRegistration> for RegistrationEntity {
    fn from(model: &VehicleRegistration) -> Self {
        Self {
            id: model.id,
            registration_number: model.registration_number.clone(),
            model_id: model.model_id,
            owner_id: model.owner_id,
            model_engine_type_id: model.model_engine_type_id,
            model_name: model.model_name.clone(),
            owner_name: model.owner_name.clone(),
        }
    }
}

impl From<RegistrationEntity> for VehicleRegistration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            registration_number: entity.registration_number,
            model_id: entity.model_id,
            model_name: entity.model_name,
            owner_id: entity.owner_id,
            owner_name: entity.owner_name,
            model_engine_type_id: entity.model_engine_type_id,
        }
    }
}

pub struct RegistrationSchema;

impl EntitySchema for RegistrationSchema {
    type Entity = RegistrationEntity;
    type Model = VehicleRegistration;

    const LABEL: &'static str = "registration";
    const TABLE: &'static str = "registrations";
    const SELECT_SQL: &'static str = "SELECT
    registrations.id AS id,
    registrations.registration_number AS registration_number,
    registrations.model_id AS model_id,
    registrations.owner_id AS owner_id,
    registrations.model_engine_type_id AS model_engine_type_id,
    registrations.model_name AS model_name,
    registrations.owner_name AS owner_name
FROM registrations";
    const WRITE_COLUMNS: &'static [&'static str] = &[
        "registration_number",
        "model_id",
        "owner_id",
        "model_engine_type_id",
        "model_name",
        "owner_name",
    ];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] = &[(
        "registrationnumber",
        "registrations.registration_number",
    )];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        (
            "registrationnumber",
            "registrations.registration_number COLLATE NOCASE",
        ),
        ("modelid", "registrations.model_id"),
        ("ownerid", "registrations.owner_id"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[
        FieldShortcut {
            field: "registrationnumber",
            column: "registrations.registration_number",
            kind: FieldKind::Text,
        },
        FieldShortcut {
            field: "modelid",
            column: "registrations.model_id",
            kind: FieldKind::Int,
        },
        FieldShortcut {
            field: "ownerid",
            column: "registrations.owner_id",
            kind: FieldKind::Int,
        },
    ];

    fn parse_row(row: &Row<'_>) -> RepoResult<RegistrationEntity> {
        Ok(RegistrationEntity {
            id: row.get("id")?,
            registration_number: row.get("registration_number")?,
            model_id: row.get("model_id")?,
            owner_id: row.get("owner_id")?,
            model_engine_type_id: row.get("model_engine_type_id")?,
            model_name: row.get("model_name")?,
            owner_name: row.get("owner_name")?,
        })
    }

    fn write_values(entity: &RegistrationEntity) -> Vec<Value> {
        vec![
            Value::Text(entity.registration_number.clone()),
            Value::Integer(entity.model_id),
            Value::Integer(entity.owner_id),
            Value::Integer(entity.model_engine_type_id),
            Value::Text(entity.model_name.clone()),
            Value::Text(entity.owner_name.clone()),
        ]
    }

    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        scope.search_filtering(filtering, Self::SEARCH_COLUMNS);
        if let Some(model_id) = filtering.model_id {
            scope.eq_int("registrations.model_id", model_id);
        }
        scope.named_int_filter(filtering, "ownerid", "registrations.owner_id")?;
        scope.named_int_filter(
            filtering,
            "modelenginetypeid",
            "registrations.model_engine_type_id",
        )
    }
}

pub type RegistrationRepository = SqliteRepository<RegistrationSchema>;
