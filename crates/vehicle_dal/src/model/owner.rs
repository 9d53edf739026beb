use super::{require_text, DomainModel, ModelValidationError};
use crate::query::FieldValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registered vehicle owner.
///
/// First and last name together form the natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Required on write; `None` only exists to represent unset input.
    pub date_of_birth: Option<NaiveDate>,
}

impl VehicleOwner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: Some(date_of_birth),
        }
    }

    /// Display name used for registration snapshots.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl DomainModel for VehicleOwner {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "firstname" => Some(FieldValue::Text(self.first_name.clone())),
            "lastname" => Some(FieldValue::Text(self.last_name.clone())),
            "dateofbirth" | "dob" => self.date_of_birth.map(FieldValue::Date),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.first_name, "first_name")?;
        require_text(&self.last_name, "last_name")?;
        if self.date_of_birth.is_none() {
            return Err(ModelValidationError::Required("date_of_birth"));
        }
        Ok(())
    }
}
