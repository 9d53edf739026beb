use chrono::NaiveDate;
use vehicle_dal::{
    EngineTypeService, ErrorKind, MakeService, ModelService, OwnerService, QueryOptions,
    RegistrationService, Repository, UnitOfWork, VehicleEngineType, VehicleMake, VehicleModel,
    VehicleOwner, VehicleRegistration,
};

struct Fixture {
    uow: UnitOfWork,
    model_id: i64,
    owner_id: i64,
    pairing_id: i64,
    engine_type_id: i64,
}

fn fixture() -> Fixture {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let make = MakeService::new(&uow)
        .add(&VehicleMake::new("BMW", "bmw"))
        .unwrap();
    let models = ModelService::new(&uow);
    let model = models.add(&VehicleModel::new(make.id, "X5", "x5")).unwrap();
    let engine_type = EngineTypeService::new(&uow)
        .add(&VehicleEngineType::new("Diesel", "d"))
        .unwrap();
    let pairing = models.add_engine_type(model.id, engine_type.id).unwrap();
    let owner = OwnerService::new(&uow)
        .add(&VehicleOwner::new(
            "Ana",
            "Horvat",
            NaiveDate::from_ymd_opt(1990, 3, 7).unwrap(),
        ))
        .unwrap();

    Fixture {
        model_id: model.id,
        owner_id: owner.id,
        pairing_id: pairing.id,
        engine_type_id: engine_type.id,
        uow,
    }
}

#[test]
fn add_copies_model_and_owner_names() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);

    let added = service
        .add(&VehicleRegistration::new(
            "ZG-1234-AB",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();
    assert_eq!(added.model_name, "X5");
    assert_eq!(added.owner_name, "Ana Horvat");
    assert!(!fx.uow.has_pending_changes());
}

#[test]
fn missing_model_is_rejected_and_nothing_is_stored() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);

    let err = service
        .add(&VehicleRegistration::new("ZG-1", 999, fx.owner_id, fx.pairing_id))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let message = err.to_string();
    assert!(message.contains("Model"), "{message}");
    assert!(message.contains("999"), "{message}");
    assert!(message.contains("does not exist"), "{message}");

    let err = service
        .add(&VehicleRegistration::new("ZG-1", fx.model_id, 999, fx.pairing_id))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Owner"));

    let err = service
        .add(&VehicleRegistration::new("ZG-1", fx.model_id, fx.owner_id, 999))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(service.get_all(&QueryOptions::new()).unwrap().total_count(), 0);
    assert!(!fx.uow.has_pending_changes());
}

#[test]
fn snapshots_do_not_follow_later_renames() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);
    let added = service
        .add(&VehicleRegistration::new(
            "ST-42",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();

    let owners = OwnerService::new(&fx.uow);
    let mut owner = owners.get_by_id(fx.owner_id).unwrap();
    owner.last_name = "Kovac".to_string();
    owners.update(&owner).unwrap();

    let stored = service.get_by_id(added.id).unwrap();
    assert_eq!(stored.owner_name, "Ana Horvat");

    let refreshed = service.update(&stored).unwrap();
    assert_eq!(refreshed.owner_name, "Ana Kovac");
}

#[test]
fn registration_numbers_are_unique_ignoring_case() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);
    let first = service
        .add(&VehicleRegistration::new(
            "ri-100-aa",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();
    let second = service
        .add(&VehicleRegistration::new(
            "RI-200-BB",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();

    let err = service
        .add(&VehicleRegistration::new(
            "RI-100-AA",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let mut same = first.clone();
    same.registration_number = "RI-100-AA".to_string();
    assert_eq!(
        service.update(&same).unwrap().registration_number,
        "RI-100-AA"
    );

    let mut clash = second.clone();
    clash.registration_number = "ri-100-aa".to_string();
    assert_eq!(service.update(&clash).unwrap_err().kind(), ErrorKind::Conflict);
    assert!(service.exists_by_number("ri-100-AA").unwrap());
}

#[test]
fn referenced_model_and_engine_type_cannot_be_deleted() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);
    let registration = service
        .add(&VehicleRegistration::new(
            "OS-7",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();

    let err = ModelService::new(&fx.uow).delete(fx.model_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let err = EngineTypeService::new(&fx.uow)
        .delete(fx.engine_type_id)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!fx.uow.has_pending_changes());

    assert!(service.delete(registration.id).unwrap());
    assert!(ModelService::new(&fx.uow).delete(fx.model_id).unwrap());
}

#[test]
fn deleting_owner_removes_their_registrations() {
    let fx = fixture();
    let service = RegistrationService::new(&fx.uow);
    let registration = service
        .add(&VehicleRegistration::new(
            "PU-9",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();

    assert!(OwnerService::new(&fx.uow).delete(fx.owner_id).unwrap());
    assert_eq!(
        service.get_by_id(registration.id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn registrations_filter_by_owner() {
    let fx = fixture();
    let owners = OwnerService::new(&fx.uow);
    let other = owners
        .add(&VehicleOwner::new(
            "Ivan",
            "Horvat",
            NaiveDate::from_ymd_opt(1985, 11, 2).unwrap(),
        ))
        .unwrap();
    let service = RegistrationService::new(&fx.uow);
    for (number, owner_id) in [("A-1", fx.owner_id), ("A-2", other.id), ("A-3", other.id)] {
        service
            .add(&VehicleRegistration::new(
                number,
                fx.model_id,
                owner_id,
                fx.pairing_id,
            ))
            .unwrap();
    }

    let page = service
        .get_paged(&QueryOptions::new().with_filter("OwnerId", other.id.to_string()))
        .unwrap();
    let numbers: Vec<&str> = page
        .data()
        .iter()
        .map(|registration| registration.registration_number.as_str())
        .collect();
    assert_eq!(numbers, ["A-2", "A-3"]);
    assert!(page.data().iter().all(|r| r.owner_name == "Ivan Horvat"));
}

#[test]
fn blocked_delete_rolls_back_only_its_own_statements() {
    let fx = fixture();
    RegistrationService::new(&fx.uow)
        .add(&VehicleRegistration::new(
            "VU-3",
            fx.model_id,
            fx.owner_id,
            fx.pairing_id,
        ))
        .unwrap();
    fx.uow
        .makes()
        .add(&VehicleMake::new("Unsaved", "u"))
        .unwrap();

    let err = ModelService::new(&fx.uow).delete(fx.model_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    assert!(fx.uow.has_pending_changes());
    assert!(ModelService::new(&fx.uow).get_by_id(fx.model_id).is_ok());
    assert_eq!(fx.uow.save_changes().unwrap(), 1);
    assert_eq!(
        MakeService::new(&fx.uow)
            .get_all(&QueryOptions::new())
            .unwrap()
            .total_count(),
        2
    );
}
