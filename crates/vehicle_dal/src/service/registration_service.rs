//! Registration use-case service.
//!
//! # Invariants
//! - Registration numbers are unique ignoring ASCII case.
//! - Model, owner and model/engine-type pairing must exist on add/update.
//! - `model_name` / `owner_name` are refreshed from the referenced rows on
//!   every add/update and left untouched otherwise.

use super::{
    commit_with, delete_with, duplicate, missing, missing_reference, no_match, require_id,
    require_text, ServiceResult,
};
use crate::model::VehicleRegistration;
use crate::query::{PagedResult, Predicate, QueryOptions};
use crate::repo::{Repository, UnitOfWork};

const LABEL: &str = "Registration";
const DEFAULT_SORT: &str = "RegistrationNumber";

pub struct RegistrationService<'uow> {
    uow: &'uow UnitOfWork,
}

impl<'uow> RegistrationService<'uow> {
    pub fn new(uow: &'uow UnitOfWork) -> Self {
        Self { uow }
    }

    pub fn get_all(
        &self,
        options: &QueryOptions,
    ) -> ServiceResult<PagedResult<VehicleRegistration>> {
        let options = options.clone().normalized_for_all();
        Ok(self.uow.registrations().get_paged(&options)?)
    }

    pub fn get_paged(
        &self,
        options: &QueryOptions,
    ) -> ServiceResult<PagedResult<VehicleRegistration>> {
        let options = options.clone().normalized_for_page(DEFAULT_SORT);
        Ok(self.uow.registrations().get_paged(&options)?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<VehicleRegistration> {
        self.uow
            .registrations()
            .get_by_id(id)?
            .ok_or_else(|| missing(LABEL, id))
    }

    pub fn get_first(
        &self,
        predicate: &Predicate<VehicleRegistration>,
    ) -> ServiceResult<VehicleRegistration> {
        self.uow
            .registrations()
            .find_first(predicate)?
            .ok_or_else(|| no_match(LABEL))
    }

    pub fn add(&self, registration: &VehicleRegistration) -> ServiceResult<VehicleRegistration> {
        require_text(&registration.registration_number, "Registration number")?;
        if self.exists_by_number(&registration.registration_number)? {
            return Err(duplicate(LABEL, &registration.registration_number));
        }
        let resolved = self.with_snapshots(registration)?;

        commit_with(self.uow, || Ok(self.uow.registrations().add(&resolved)?))
    }

    pub fn update(
        &self,
        registration: &VehicleRegistration,
    ) -> ServiceResult<VehicleRegistration> {
        require_id(registration.id, LABEL)?;
        require_text(&registration.registration_number, "Registration number")?;
        let same_number = self.uow.registrations().find_first(&Predicate::field_eq(
            "RegistrationNumber",
            registration.registration_number.as_str(),
        ))?;
        if same_number.is_some_and(|other| other.id != registration.id) {
            return Err(duplicate(LABEL, &registration.registration_number));
        }
        if self.uow.registrations().get_by_id(registration.id)?.is_none() {
            return Err(missing(LABEL, registration.id));
        }
        let resolved = self.with_snapshots(registration)?;

        commit_with(self.uow, || Ok(self.uow.registrations().update(&resolved)?))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<bool> {
        require_id(id, LABEL)?;
        delete_with(self.uow, || self.uow.registrations().delete(id))
    }

    pub fn exists_by_number(&self, registration_number: &str) -> ServiceResult<bool> {
        if registration_number.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.uow.registrations().exists(&Predicate::field_eq(
            "RegistrationNumber",
            registration_number,
        ))?)
    }

    /// Checks every reference and copies the current model and owner names.
    fn with_snapshots(
        &self,
        registration: &VehicleRegistration,
    ) -> ServiceResult<VehicleRegistration> {
        let model = self
            .uow
            .models()
            .get_by_id(registration.model_id)?
            .ok_or_else(|| missing_reference("Model", registration.model_id))?;
        let owner = self
            .uow
            .owners()
            .get_by_id(registration.owner_id)?
            .ok_or_else(|| missing_reference("Owner", registration.owner_id))?;
        if self
            .uow
            .model_engine_types()
            .get_by_id(registration.model_engine_type_id)?
            .is_none()
        {
            return Err(missing_reference(
                "Model engine type",
                registration.model_engine_type_id,
            ));
        }

        let mut resolved = registration.clone();
        resolved.model_name = model.name;
        resolved.owner_name = owner.full_name();
        Ok(resolved)
    }
}
