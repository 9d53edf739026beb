use super::{require_text, DomainModel, ModelValidationError};
use crate::query::FieldValue;
use serde::{Deserialize, Serialize};

/// Vehicle manufacturer (BMW, Ford, Volkswagen).
///
/// `name` is the natural key and is unique ignoring ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleMake {
    pub id: i64,
    pub name: String,
    pub abrv: String,
}

impl VehicleMake {
    pub fn new(name: impl Into<String>, abrv: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            abrv: abrv.into(),
        }
    }
}

impl DomainModel for VehicleMake {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "abrv" => Some(FieldValue::Text(self.abrv.clone())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.name, "name")
    }
}
