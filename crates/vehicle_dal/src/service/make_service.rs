//! Make use-case service.
//!
//! # Invariants
//! - Make names are unique ignoring ASCII case.
//! - Deleting a make cascades to its models; it is refused while any of
//!   those models is still registered.

use super::{
    commit_with, delete_with, duplicate, missing, no_match, require_id, require_text,
    ServiceResult,
};
use crate::model::VehicleMake;
use crate::query::{PagedResult, Predicate, QueryOptions};
use crate::repo::{Repository, UnitOfWork};

const LABEL: &str = "Make";
const DEFAULT_SORT: &str = "Name";

pub struct MakeService<'uow> {
    uow: &'uow UnitOfWork,
}

impl<'uow> MakeService<'uow> {
    pub fn new(uow: &'uow UnitOfWork) -> Self {
        Self { uow }
    }

    /// Every matching make in one page; paging in `options` is ignored.
    pub fn get_all(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleMake>> {
        let options = options.clone().normalized_for_all();
        Ok(self.uow.makes().get_paged(&options)?)
    }

    /// Paged makes, sorted by name unless the caller chose a sort.
    pub fn get_paged(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleMake>> {
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.makes().get_paged(&options)?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<VehicleMake> {
        self.uow
            .makes()
            .get_by_id(id)?
            .ok_or_else(|| missing(LABEL, id))
    }

    pub fn get_first(&self, predicate: &Predicate<VehicleMake>) -> ServiceResult<VehicleMake> {
        self.uow
            .makes()
            .find_first(predicate)?
            .ok_or_else(|| no_match(LABEL))
    }

    pub fn add(&self, make: &VehicleMake) -> ServiceResult<VehicleMake> {
        require_text(&make.name, "Make name")?;
        if self.exists_by_name(&make.name)? {
            return Err(duplicate(LABEL, &make.name));
        }

        commit_with(self.uow, || Ok(self.uow.makes().add(make)?))
    }

    pub fn update(&self, make: &VehicleMake) -> ServiceResult<VehicleMake> {
        require_id(make.id, LABEL)?;
        require_text(&make.name, "Make name")?;
        if self.uow.makes().get_by_id(make.id)?.is_none() {
            return Err(missing(LABEL, make.id));
        }
        let same_name = self
            .uow
            .makes()
            .find_first(&Predicate::field_eq("Name", make.name.as_str()))?;
        if same_name.is_some_and(|other| other.id != make.id) {
            return Err(duplicate(LABEL, &make.name));
        }

        commit_with(self.uow, || Ok(self.uow.makes().update(make)?))
    }

    /// `Ok(false)` when no make has this id.
    pub fn delete(&self, id: i64) -> ServiceResult<bool> {
        require_id(id, LABEL)?;
        delete_with(self.uow, || self.uow.makes().delete(id))
    }

    /// Case-insensitive; blank names never exist.
    pub fn exists_by_name(&self, name: &str) -> ServiceResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self
            .uow
            .makes()
            .exists(&Predicate::field_eq("Name", name))?)
    }
}
