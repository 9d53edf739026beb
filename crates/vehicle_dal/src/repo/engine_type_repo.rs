//! Engine type storage schema.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::scope::QueryScope;
use super::RepoResult;
use crate::model::VehicleEngineType;
use crate::query::{FieldKind, FieldShortcut, FilterOptions};
use rusqlite::types::Value;
use rusqlite::Row;

/// Row of `engine_types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTypeEntity {
    pub id: i64,
    pub kind: String,
    pub abrv: String,
}

impl From<&VehicleEngineType> for EngineTypeEntity {
    fn from(model: &VehicleEngineType) -> Self {
        Self {
            id: model.id,
            kind: model.kind.clone(),
            abrv: model.abrv.clone(),
        }
    }
}

impl From<EngineTypeEntity> for VehicleEngineType {
    fn from(entity: EngineTypeEntity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            abrv: entity.abrv,
        }
    }
}

pub struct EngineTypeSchema;

impl EntitySchema for EngineTypeSchema {
    type Entity = EngineTypeEntity;
    type Model = VehicleEngineType;

    const LABEL: &'static str = "engine_type";
    const TABLE: &'static str = "engine_types";
    const SELECT_SQL: &'static str = "SELECT
    engine_types.id AS id,
    engine_types.type AS type,
    engine_types.abrv AS abrv
FROM engine_types";
    const WRITE_COLUMNS: &'static [&'static str] = &["type", "abrv"];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] =
        &[("type", "engine_types.type"), ("abrv", "engine_types.abrv")];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("type", "engine_types.type COLLATE NOCASE"),
        ("abrv", "engine_types.abrv COLLATE NOCASE"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[FieldShortcut {
        field: "type",
        column: "engine_types.type",
        kind: FieldKind::Text,
    }];

    fn parse_row(row: &Row<'_>) -> RepoResult<EngineTypeEntity> {
        Ok(EngineTypeEntity {
            id: row.get("id")?,
            kind: row.get("type")?,
            abrv: row.get("abrv")?,
        })
    }

    fn write_values(entity: &EngineTypeEntity) -> Vec<Value> {
        vec![
            Value::Text(entity.kind.clone()),
            Value::Text(entity.abrv.clone()),
        ]
    }

    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        scope.search_filtering(filtering, Self::SEARCH_COLUMNS);
        scope.named_text_filter(filtering, "abrv", "engine_types.abrv");
        Ok(())
    }
}

pub type EngineTypeRepository = SqliteRepository<EngineTypeSchema>;
