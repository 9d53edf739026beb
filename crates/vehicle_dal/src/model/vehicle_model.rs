//! Vehicle models and their engine-type pairings.

use super::{require_positive, require_text, DomainModel, ModelValidationError};
use crate::query::FieldValue;
use serde::{Deserialize, Serialize};

/// A model produced by one make (X5 by BMW).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleModel {
    pub id: i64,
    pub name: String,
    pub abrv: String,
    pub make_id: i64,
    /// Current name of the referenced make, projected on read. Ignored on
    /// write.
    pub make_name: String,
}

impl VehicleModel {
    pub fn new(make_id: i64, name: impl Into<String>, abrv: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            abrv: abrv.into(),
            make_id,
            make_name: String::new(),
        }
    }
}

impl DomainModel for VehicleModel {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "abrv" => Some(FieldValue::Text(self.abrv.clone())),
            "makeid" => Some(FieldValue::Int(self.make_id)),
            "makename" => Some(FieldValue::Text(self.make_name.clone())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.name, "name")?;
        require_positive(self.make_id, "make_id")
    }
}

/// Junction row: one engine type offered for one model.
///
/// Registrations point at a pairing rather than at the engine type directly,
/// so a pairing cannot be removed while registrations still use it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelEngineType {
    pub id: i64,
    pub model_id: i64,
    pub engine_type_id: i64,
}

impl ModelEngineType {
    pub fn new(model_id: i64, engine_type_id: i64) -> Self {
        Self {
            id: 0,
            model_id,
            engine_type_id,
        }
    }
}

impl DomainModel for ModelEngineType {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "modelid" => Some(FieldValue::Int(self.model_id)),
            "enginetypeid" => Some(FieldValue::Int(self.engine_type_id)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_positive(self.model_id, "model_id")?;
        require_positive(self.engine_type_id, "engine_type_id")
    }
}
