//! Owner use-case service.
//!
//! Owners are identified by first plus last name; two owners may share a
//! first name or a last name, but not both.

use super::{
    commit_with, delete_with, duplicate, missing, no_match, require_id, require_text,
    ServiceError, ServiceResult,
};
use crate::model::VehicleOwner;
use crate::query::{FieldMatch, PagedResult, Predicate, QueryOptions};
use crate::repo::{Repository, UnitOfWork};

const LABEL: &str = "Owner";
const DEFAULT_SORT: &str = "LastName";

pub struct OwnerService<'uow> {
    uow: &'uow UnitOfWork,
}

impl<'uow> OwnerService<'uow> {
    pub fn new(uow: &'uow UnitOfWork) -> Self {
        Self { uow }
    }

    pub fn get_all(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleOwner>> {
        let options = options.clone().normalized_for_all();
        Ok(self.uow.owners().get_paged(&options)?)
    }

    pub fn get_paged(&self, options: &QueryOptions) -> ServiceResult<PagedResult<VehicleOwner>> {
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.owners().get_paged(&options)?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<VehicleOwner> {
        self.uow
            .owners()
            .get_by_id(id)?
            .ok_or_else(|| missing(LABEL, id))
    }

    pub fn get_first(&self, predicate: &Predicate<VehicleOwner>) -> ServiceResult<VehicleOwner> {
        self.uow
            .owners()
            .find_first(predicate)?
            .ok_or_else(|| no_match(LABEL))
    }

    pub fn add(&self, owner: &VehicleOwner) -> ServiceResult<VehicleOwner> {
        validate_owner(owner)?;
        if self.exists_by_name(&owner.first_name, &owner.last_name)? {
            return Err(duplicate(LABEL, &owner.full_name()));
        }

        commit_with(self.uow, || Ok(self.uow.owners().add(owner)?))
    }

    pub fn update(&self, owner: &VehicleOwner) -> ServiceResult<VehicleOwner> {
        require_id(owner.id, LABEL)?;
        validate_owner(owner)?;
        if self.uow.owners().get_by_id(owner.id)?.is_none() {
            return Err(missing(LABEL, owner.id));
        }
        let same_name = self
            .uow
            .owners()
            .find_first(&name_predicate(&owner.first_name, &owner.last_name))?;
        if same_name.is_some_and(|other| other.id != owner.id) {
            return Err(duplicate(LABEL, &owner.full_name()));
        }

        commit_with(self.uow, || Ok(self.uow.owners().update(owner)?))
    }

    /// Registrations of the owner are removed with it.
    pub fn delete(&self, id: i64) -> ServiceResult<bool> {
        require_id(id, LABEL)?;
        delete_with(self.uow, || self.uow.owners().delete(id))
    }

    /// Case-insensitive match on both names.
    pub fn exists_by_name(&self, first_name: &str, last_name: &str) -> ServiceResult<bool> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self
            .uow
            .owners()
            .exists(&name_predicate(first_name, last_name))?)
    }
}

fn name_predicate(first_name: &str, last_name: &str) -> Predicate<VehicleOwner> {
    Predicate::all_of([
        FieldMatch::new("FirstName", first_name),
        FieldMatch::new("LastName", last_name),
    ])
}

fn validate_owner(owner: &VehicleOwner) -> ServiceResult<()> {
    require_text(&owner.first_name, "Owner first name")?;
    require_text(&owner.last_name, "Owner last name")?;
    if owner.date_of_birth.is_none() {
        return Err(ServiceError::Validation(
            "Owner date of birth is required".to_string(),
        ));
    }
    Ok(())
}
