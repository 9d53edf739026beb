//! Make storage schema.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::scope::QueryScope;
use super::RepoResult;
use crate::model::VehicleMake;
use crate::query::{FieldKind, FieldShortcut, FilterOptions};
use rusqlite::types::Value;
use rusqlite::Row;

/// Row of `makes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeEntity {
    pub id: i64,
    pub name: String,
    pub abrv: String,
}

impl From<&VehicleMake> for MakeEntity {
    fn from(model: &VehicleMake) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            abrv: model.abrv.clone(),
        }
    }
}

impl From<MakeEntity> for VehicleMake {
    fn from(entity: MakeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            abrv: entity.abrv,
        }
    }
}

pub struct MakeSchema;

impl EntitySchema for MakeSchema {
    type Entity = MakeEntity;
    type Model = VehicleMake;

    const LABEL: &'static str = "make";
    const TABLE: &'static str = "makes";
    const SELECT_SQL: &'static str = "SELECT
    makes.id AS id,
    makes.name AS name,
    makes.abrv AS abrv
FROM makes";
    const WRITE_COLUMNS: &'static [&'static str] = &["name", "abrv"];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] =
        &[("name", "makes.name"), ("abrv", "makes.abrv")];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("name", "makes.name COLLATE NOCASE"),
        ("abrv", "makes.abrv COLLATE NOCASE"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[FieldShortcut {
        field: "name",
        column: "makes.name",
        kind: FieldKind::Text,
    }];

    fn parse_row(row: &Row<'_>) -> RepoResult<MakeEntity> {
        Ok(MakeEntity {
            id: row.get("id")?,
            name: row.get("name")?,
            abrv: row.get("abrv")?,
        })
    }

    fn write_values(entity: &MakeEntity) -> Vec<Value> {
        vec![
            Value::Text(entity.name.clone()),
            Value::Text(entity.abrv.clone()),
        ]
    }

    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        scope.search_filtering(filtering, Self::SEARCH_COLUMNS);
        scope.named_text_filter(filtering, "abrv", "makes.abrv");
        Ok(())
    }
}

pub type MakeRepository = SqliteRepository<MakeSchema>;
