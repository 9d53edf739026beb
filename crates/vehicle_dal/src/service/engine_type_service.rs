//! Engine type use-case service.

use super::{
    commit_with, delete_with, duplicate, missing, no_match, require_id, require_text,
    ServiceResult,
};
use crate::model::VehicleEngineType;
use crate::query::{PagedResult, Predicate, QueryOptions};
use crate::repo::{Repository, UnitOfWork};

const LABEL: &str = "Engine type";
const DEFAULT_SORT: &str = "Type";

pub struct EngineTypeService<'uow> {
    uow: &'uow UnitOfWork,
}

impl<'uow> EngineTypeService<'uow> {
    pub fn new(uow: &'uow UnitOfWork) -> Self {
        Self { uow }
    }

    pub fn get_all(
        &self,
        options: &QueryOptions,
    ) -> ServiceResult<PagedResult<VehicleEngineType>> {
        let options = options.clone().normalized_for_all();
        Ok(self.uow.engine_types().get_paged(&options)?)
    }

    pub fn get_paged(
        &self,
        options: &QueryOptions,
    ) -> ServiceResult<PagedResult<VehicleEngineType>> {
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.engine_types().get_paged(&options)?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<VehicleEngineType> {
        self.uow
            .engine_types()
            .get_by_id(id)?
            .ok_or_else(|| missing(LABEL, id))
    }

    pub fn get_first(
        &self,
        predicate: &Predicate<VehicleEngineType>,
    ) -> ServiceResult<VehicleEngineType> {
        self.uow
            .engine_types()
            .find_first(predicate)?
            .ok_or_else(|| no_match(LABEL))
    }

    pub fn add(&self, engine_type: &VehicleEngineType) -> ServiceResult<VehicleEngineType> {
        require_text(&engine_type.kind, "Engine type")?;
        if self.exists_by_type(&engine_type.kind)? {
            return Err(duplicate(LABEL, &engine_type.kind));
        }

        commit_with(self.uow, || Ok(self.uow.engine_types().add(engine_type)?))
    }

    pub fn update(&self, engine_type: &VehicleEngineType) -> ServiceResult<VehicleEngineType> {
        require_id(engine_type.id, LABEL)?;
        require_text(&engine_type.kind, "Engine type")?;
        if self.uow.engine_types().get_by_id(engine_type.id)?.is_none() {
            return Err(missing(LABEL, engine_type.id));
        }
        let same_type = self
            .uow
            .engine_types()
            .find_first(&Predicate::field_eq("Type", engine_type.kind.as_str()))?;
        if same_type.is_some_and(|other| other.id != engine_type.id) {
            return Err(duplicate(LABEL, &engine_type.kind));
        }

        commit_with(self.uow, || Ok(self.uow.engine_types().update(engine_type)?))
    }

    /// Removes the type and every model pairing that used it; refused while a
    /// registration still points at one of those pairings.
    pub fn delete(&self, id: i64) -> ServiceResult<bool> {
        require_id(id, LABEL)?;
        delete_with(self.uow, || self.uow.engine_types().delete(id))
    }

    pub fn exists_by_type(&self, kind: &str) -> ServiceResult<bool> {
        if kind.trim().is_empty() {
            return Ok(false);
        }
        Ok(self
            .uow
            .engine_types()
            .exists(&Predicate::field_eq("Type", kind))?)
    }
}
