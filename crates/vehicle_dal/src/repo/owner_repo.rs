//! Owner storage schema.
//!
//! Dates of birth are stored as ISO-8601 `YYYY-MM-DD` text so they sort
//! chronologically.

use super::generic_repo::{EntitySchema, SqliteRepository};
use super::{RepoError, RepoResult};
use crate::model::VehicleOwner;
use crate::query::{FieldKind, FieldShortcut};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row of `owners`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerEntity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<&VehicleOwner> for OwnerEntity {
    fn from(model: &VehicleOwner) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            date_of_birth: model.date_of_birth,
        }
    }
}

impl From<OwnerEntity> for VehicleOwner {
    fn from(entity: OwnerEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            date_of_birth: entity.date_of_birth,
        }
    }
}

pub struct OwnerSchema;

impl EntitySchema for OwnerSchema {
    type Entity = OwnerEntity;
    type Model = VehicleOwner;

    const LABEL: &'static str = "owner";
    const TABLE: &'static str = "owners";
    const SELECT_SQL: &'static str = "SELECT
    owners.id AS id,
    owners.first_name AS first_name,
    owners.last_name AS last_name,
    owners.date_of_birth AS date_of_birth
FROM owners";
    const WRITE_COLUMNS: &'static [&'static str] = &["first_name", "last_name", "date_of_birth"];
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("firstname", "owners.first_name"),
        ("lastname", "owners.last_name"),
    ];
    const SORT_COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("firstname", "owners.first_name COLLATE NOCASE"),
        ("lastname", "owners.last_name COLLATE NOCASE"),
        ("dateofbirth", "owners.date_of_birth"),
        ("dob", "owners.date_of_birth"),
    ];
    const FIELD_SHORTCUTS: &'static [FieldShortcut] = &[
        FieldShortcut {
            field: "firstname",
            column: "owners.first_name",
            kind: FieldKind::Text,
        },
        FieldShortcut {
            field: "lastname",
            column: "owners.last_name",
            kind: FieldKind::Text,
        },
    ];

    fn parse_row(row: &Row<'_>) -> RepoResult<OwnerEntity> {
        let id: i64 = row.get("id")?;
        let raw_date: String = row.get("date_of_birth")?;
        let date_of_birth = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|err| {
            RepoError::InvalidData(format!(
                "owner {id} has invalid date_of_birth `{raw_date}`: {err}"
            ))
        })?;

        Ok(OwnerEntity {
            id,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            date_of_birth: Some(date_of_birth),
        })
    }

    fn write_values(entity: &OwnerEntity) -> Vec<Value> {
        vec![
            Value::Text(entity.first_name.clone()),
            Value::Text(entity.last_name.clone()),
            entity
                .date_of_birth
                .map_or(Value::Null, |date| {
                    Value::Text(date.format(DATE_FORMAT).to_string())
                }),
        ]
    }
}

pub type OwnerRepository = SqliteRepository<OwnerSchema>;

#[cfg(test)]
mod tests {
    use super::{OwnerEntity, OwnerSchema};
    use crate::repo::EntitySchema;
    use chrono::NaiveDate;
    use rusqlite::types::Value;

    #[test]
    fn date_of_birth_is_written_as_iso_text() {
        let entity = OwnerEntity {
            id: 0,
            first_name: "Ana".to_string(),
            last_name: "Horvat".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 7),
        };
        let values = OwnerSchema::write_values(&entity);
        assert_eq!(values[2], Value::Text("1990-03-07".to_string()));
    }
}
