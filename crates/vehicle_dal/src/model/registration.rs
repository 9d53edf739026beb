use super::{require_positive, require_text, DomainModel, ModelValidationError};
use crate::query::FieldValue;
use serde::{Deserialize, Serialize};

/// Vehicle registration linking an owner to a model/engine pairing.
///
/// # Invariants
/// - `registration_number` is unique ignoring ASCII case.
/// - `model_name` and `owner_name` are snapshots copied when the registration
///   is added or updated. Renaming the model or owner later does not change
///   them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRegistration {
    pub id: i64,
    pub registration_number: String,
    pub model_id: i64,
    pub model_name: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub model_engine_type_id: i64,
}

impl VehicleRegistration {
    pub fn new(
        registration_number: impl Into<String>,
        model_id: i64,
        owner_id: i64,
        model_engine_type_id: i64,
    ) -> Self {
        Self {
            id: 0,
            registration_number: registration_number.into(),
            model_id,
            model_name: String::new(),
            owner_id,
            owner_name: String::new(),
            model_engine_type_id,
        }
    }
}

impl DomainModel for VehicleRegistration {
    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "registrationnumber" => Some(FieldValue::Text(self.registration_number.clone())),
            "modelid" => Some(FieldValue::Int(self.model_id)),
            "modelname" => Some(FieldValue::Text(self.model_name.clone())),
            "ownerid" => Some(FieldValue::Int(self.owner_id)),
            "ownername" => Some(FieldValue::Text(self.owner_name.clone())),
            "modelenginetypeid" => Some(FieldValue::Int(self.model_engine_type_id)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.registration_number, "registration_number")?;
        require_positive(self.model_id, "model_id")?;
        require_positive(self.owner_id, "owner_id")?;
        require_positive(self.model_engine_type_id, "model_engine_type_id")
    }
}
