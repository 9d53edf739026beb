//! Vehicle model storage schema.
//!
//! Reads project the owning make's current name through a scalar subquery;
//! writes only touch the `models` columns.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::scope::QueryScope;
use super::RepoResult;
use crate::model::VehicleModel;
use crate::query::{FieldKind, FieldShortcut, FilterOptions, PagedResult, QueryOptions};
use rusqlite::types::Value;
use rusqlite::Row;

/// Row of `models` plus the projected make name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntity {
    pub id: i64,
    pub make_id: i64,
    pub name: String,
    pub abrv: String,
    pub make_name: Option<String>,
}

impl From<&VehicleModel> for ModelEntity {
    fn from(model: &VehicleModel) -> Self {
        Self {
            id: model.id,
            make_id: model.make_id,
            name: model.name.clone(),
            abrv: model.abrv.clone(),
            make_name: None,
        }
    }
}

impl From<ModelEntity> for VehicleModel {
    fn from(entity: ModelEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            abrv: entity.abrv,
            make_id: entity.make_id,
            make_name: entity.make_name.unwrap_or_default(),
        }
    }
}

pub struct ModelSchema;

impl EntitySchema for ModelSchema {
    type Entity = ModelEntity;
    type Model = VehicleModel;

    const LABEL: &'static str = "model";
    const TABLE: &'static str = "models";
    const SELECT_SQL: &'static str = "SELECT
    models.id AS id,
    models.make_id AS make_id,
    models.name AS name,
    models.abrv AS abrv,
    (SELECT makes.name FROM makes WHERE makes.id = models.make_id) AS make_name
FROM models";
    const WRITE_COLUMNS: &'static [&'static str] = &["make_id", "name", "abrv"];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] =
        &[("name", "models.name"), ("abrv", "models.abrv")];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("name", "models.name COLLATE NOCASE"),
        ("abrv", "models.abrv COLLATE NOCASE"),
        ("makeid", "models.make_id"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[
        FieldShortcut {
            field: "name",
            column: "models.name",
            kind: FieldKind::Text,
        },
        FieldShortcut {
            field: "makeid",
            column: "models.make_id",
            kind: FieldKind::Int,
        },
    ];

    fn parse_row(row: &Row<'_>) -> RepoResult<ModelEntity> {
        Ok(ModelEntity {
            id: row.get("id")?,
            make_id: row.get("make_id")?,
            name: row.get("name")?,
            abrv: row.get("abrv")?,
            make_name: row.get("make_name")?,
        })
    }

    fn write_values(entity: &ModelEntity) -> Vec<Value> {
        vec![
            Value::Integer(entity.make_id),
            Value::Text(entity.name.clone()),
            Value::Text(entity.abrv.clone()),
        ]
    }

    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        scope.search_filtering(filtering, Self::SEARCH_COLUMNS);
        if let Some(make_id) = filtering.make_id {
            scope.eq_int("models.make_id", make_id);
        }
        scope.named_text_filter(filtering, "abrv", "models.abrv");
        Ok(())
    }
}

pub type ModelRepository = SqliteRepository<ModelSchema>;

impl SqliteRepository<ModelSchema> {
    /// Paged models of one make; the caller's filters narrow it further.
    pub fn get_paged_by_make_id(
        &self,
        make_id: i64,
        options: &QueryOptions,
    ) -> RepoResult<PagedResult<VehicleModel>> {
        let mut scope = QueryScope::new();
        scope.eq_int("models.make_id", make_id);
        self.query_page(scope, options)
    }
}
