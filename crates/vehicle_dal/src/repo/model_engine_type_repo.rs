//! Model/engine-type junction storage schema.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::scope::QueryScope;
use super::RepoResult;
use crate::model::ModelEngineType;
use crate::query::{FieldKind, FieldShortcut, FilterOptions};
use rusqlite::types::Value;
use rusqlite::Row;

/// Row of `model_engine_types`. Same shape as the domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEngineTypeEntity {
    pub id: i64,
    pub model_id: i64,
    pub engine_type_id: i64,
}

impl From<&ModelEngineType> for ModelEngineTypeEntity {
    fn from(model: &ModelEngineType) -> Self {
        Self {
            id: model.id,
            model_id: model.model_id,
            engine_type_id: model.engine_type_id,
        }
    }
}

impl From<ModelEngineTypeEntity> for ModelEngineType {
    fn from(entity: ModelEngineTypeEntity) -> Self {
        Self {
            id: entity.id,
            model_id: entity.model_id,
            engine_type_id: entity.engine_type_id,
        }
    }
}

pub struct ModelEngineTypeSchema;

impl EntitySchema for ModelEngineTypeSchema {
    type Entity = ModelEngineTypeEntity;
    type Model = ModelEngineType;

    const LABEL: &'static str = "model_engine_type";
    const TABLE: &'static str = "model_engine_types";
    const SELECT_SQL: &'static str = "SELECT
    model_engine_types.id AS id,
    model_engine_types.model_id AS model_id,
    model_engine_types.engine_type_id AS engine_type_id
FROM model_engine_types";
    const WRITE_COLUMNS: &'static [&'static str] = &["model_id", "engine_type_id"];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] = &[];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("modelid", "model_engine_types.model_id"),
        ("enginetypeid", "model_engine_types.engine_type_id"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[
        FieldShortcut {
            field: "modelid",
            column: "model_engine_types.model_id",
            kind: FieldKind::Int,
        },
        FieldShortcut {
            field: "enginetypeid",
            column: "model_engine_types.engine_type_id",
            kind: FieldKind::Int,
        },
    ];

    fn parse_row(row: &Row<'_>) -> RepoResult<ModelEngineTypeEntity> {
        Ok(ModelEngineTypeEntity {
            id: row.get("id")?,
            model_id: row.get("model_id")?,
            engine_type_id: row.get("engine_type_id")?,
        })
    }

    fn write_values(entity: &ModelEngineTypeEntity) -> Vec<Value> {
        vec![
            Value::Integer(entity.model_id),
            Value::Integer(entity.engine_type_id),
        ]
    }

    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        if let Some(model_id) = filtering.model_id {
            scope.eq_int("model_engine_types.model_id", model_id);
        }
        scope.named_int_filter(
            filtering,
            "enginetypeid",
            "model_engine_types.engine_type_id",
        )
    }
}

pub type ModelEngineTypeRepository = SqliteRepository<ModelEngineTypeSchema>;
