use super::{require_text, DomainModel, ModelValidationError};
use crate::query::FieldValue;
use serde::{Deserialize, Serialize};

/// Engine category (Diesel, Petrol, Electric).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleEngineType {
    pub id: i64,
    /// Serialized and addressed as `type`; natural key.
    #[serde(rename = "type")]
    pub kind: String,
    pub abrv: String,
}

impl VehicleEngineType {
    pub fn new(kind: impl Into<String>, abrv: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: kind.into(),
            abrv: abrv.into(),
        }
    }
}

impl DomainModel for VehicleEngineType {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "type" | "kind" => Some(FieldValue::Text(self.kind.clone())),
            "abrv" => Some(FieldValue::Text(self.abrv.clone())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.kind, "type")
    }
}
