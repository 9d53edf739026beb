//! Vehicle model use-case service, including engine-type pairings.
//!
//! # Invariants
//! - A model always references an existing make.
//! - Model names are unique across all makes, ignoring ASCII case.
//! - A model/engine-type pair is stored at most once.

use super::{
    commit_with, delete_with, duplicate, missing, missing_reference, no_match, require_id,
    require_text, ServiceError, ServiceResult,
};
use crate::model::{ModelEngineType, VehicleEngineType, VehicleModel};
use crate::query::{FieldMatch, PagedResult, Predicate, QueryOptions};
use crate::repo::{Repository, UnitOfWork};

const LABEL: &str = "Model";
const DEFAULT_SORT: &str = "Name";

pub struct ModelService<'uow> {
    uow: &'uow UnitOfWork,
}

impl<'uow> ModelService<'uow> {
    pub fn new(uow: &'uow UnitOfWork) -> Self {
        Self { uow }
    }

    pub fn get_all(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleModel>> {
        let options = options.clone().normalized_for_all();
        Ok(self.uow.models().get_paged(&options)?)
    }

    pub fn get_paged(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleModel>> {
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.models().get_paged(&options)?)
    }

    /// Paged models of one make. The make must exist.
    pub fn get_paged_by_make_id(
        &self,
        make_id: i64,
        options: &QueryOptions,
    ) -> ServiceResult<PagedResult<VehicleModel>> {
        require_id(make_id, "Make")?;
        if self.uow.makes().get_by_id(make_id)?.is_none() {
            return Err(missing("Make", make_id));
        }
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.models().get_paged_by_make_id(make_id, &options)?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<VehicleModel> {
        self.uow
            .models()
            .get_by_id(id)?
            .ok_or_else(|| missing(LABEL, id))
    }

    pub fn get_first(&self, predicate: &Predicate<VehicleModel>) -> ServiceResult<VehicleModel> {
        self.uow
            .models()
            .find_first(predicate)?
            .ok_or_else(|| no_match(LABEL))
    }

    pub fn add(&self, model: &VehicleModel) -> ServiceResult<VehicleModel> {
        require_text(&model.name, "Model name")?;
        self.require_make(model.make_id)?;
        if self.exists_by_name(&model.name)? {
            return Err(duplicate(LABEL, &model.name));
        }

        commit_with(self.uow, || Ok(self.uow.models().add(model)?))
    }

    pub fn update(&self, model: &VehicleModel) -> ServiceResult<VehicleModel> {
        require_id(model.id, LABEL)?;
        require_text(&model.name, "Model name")?;
        if self.uow.models().get_by_id(model.id)?.is_none() {
            return Err(missing(LABEL, model.id));
        }
        self.require_make(model.make_id)?;
        let same_name = self
            .uow
            .models()
            .find_first(&Predicate::field_eq("Name", model.name.as_str()))?;
        if same_name.is_some_and(|other| other.id != model.id) {
            return Err(duplicate(LABEL, &model.name));
        }

        commit_with(self.uow, || Ok(self.uow.models().update(model)?))
    }

    /// Refused with `Conflict` while registrations reference the model.
    pub fn delete(&self, id: i64) -> ServiceResult<bool> {
        require_id(id, LABEL)?;
        delete_with(self.uow, || self.uow.models().delete(id))
    }

    pub fn exists_by_name(&self, name: &str) -> ServiceResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self
            .uow
            .models()
            .exists(&Predicate::field_eq("Name", name))?)
    }

    /// Offers `engine_type_id` for `model_id`; returns the new pairing.
    pub fn add_engine_type(
        &self,
        model_id: i64,
        engine_type_id: i64,
    ) -> ServiceResult<ModelEngineType> {
        require_id(model_id, LABEL)?;
        require_id(engine_type_id, "Engine type")?;
        if self.uow.models().get_by_id(model_id)?.is_none() {
            return Err(missing_reference(LABEL, model_id));
        }
        if self.uow.engine_types().get_by_id(engine_type_id)?.is_none() {
            return Err(missing_reference("Engine type", engine_type_id));
        }

        let pairing = Predicate::all_of([
            FieldMatch::new("ModelId", model_id),
            FieldMatch::new("EngineTypeId", engine_type_id),
        ]);
        if self.uow.model_engine_types().exists(&pairing)? {
            return Err(ServiceError::Conflict(format!(
                "Engine type {engine_type_id} is already offered for model {model_id}"
            )));
        }

        let pair = ModelEngineType::new(model_id, engine_type_id);
        commit_with(self.uow, || Ok(self.uow.model_engine_types().add(&pair)?))
    }

    /// Engine types offered for one model, in pairing order.
    pub fn engine_types_for_model(&self, model_id: i64) -> ServiceResult<Vec<VehicleEngineType>> {
        if self.uow.models().get_by_id(model_id)?.is_none() {
            return Err(missing(LABEL, model_id));
        }
        let pairings = self
            .uow
            .model_engine_types()
            .get_all(&QueryOptions::new().with_model_id(model_id))?;

        let mut engine_types = Vec::with_capacity(pairings.len());
        for pairing in pairings {
            if let Some(engine_type) = self.uow.engine_types().get_by_id(pairing.engine_type_id)? {
                engine_types.push(engine_type);
            }
        }
        Ok(engine_types)
    }

    fn require_make(&self, make_id: i64) -> ServiceResult<()> {
        require_id(make_id, "Make")?;
        if self.uow.makes().get_by_id(make_id)?.is_none() {
            return Err(missing_reference("Make", make_id));
        }
        Ok(())
    }
}
