use vehicle_dal::{
    ErrorKind, MakeService, Predicate, QueryOptions, Repository, ServiceError, UnitOfWork,
    VehicleMake,
};

#[test]
fn add_commits_and_returns_assigned_identity() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);

    let added = service.add(&VehicleMake::new("Audi", "audi")).unwrap();
    assert!(added.id > 0);
    assert!(!uow.has_pending_changes());
    assert_eq!(service.get_by_id(added.id).unwrap(), added);
}

#[test]
fn duplicate_name_differing_only_in_case_is_a_conflict() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);
    service.add(&VehicleMake::new("Audi", "audi")).unwrap();

    let err = service.add(&VehicleMake::new("AUDI", "a2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!uow.has_pending_changes());

    let all = service.get_all(&QueryOptions::new()).unwrap();
    assert_eq!(all.total_count(), 1);
    assert_eq!(all.data()[0].abrv, "audi");
}

#[test]
fn blank_name_is_a_validation_error() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);

    let err = service.add(&VehicleMake::new("   ", "x")).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(!service.exists_by_name("   ").unwrap());
}

#[test]
fn update_excludes_itself_from_duplicate_check() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);
    let mut bmw = service.add(&VehicleMake::new("BMW", "bmw")).unwrap();
    let audi = service.add(&VehicleMake::new("Audi", "audi")).unwrap();

    bmw.name = "bmw".to_string();
    bmw.abrv = "b".to_string();
    let updated = service.update(&bmw).unwrap();
    assert_eq!(updated.name, "bmw");

    let mut clash = audi.clone();
    clash.name = "BMW".to_string();
    let err = service.update(&clash).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(service.get_by_id(audi.id).unwrap().name, "Audi");
}

#[test]
fn update_and_lookup_of_missing_ids() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);

    let mut ghost = VehicleMake::new("Ghost", "g");
    ghost.id = 77;
    assert_eq!(service.update(&ghost).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.get_by_id(77).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        service
            .get_first(&Predicate::field_eq("Name", "Ghost"))
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );

    ghost.id = 0;
    assert_eq!(service.update(&ghost).unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn delete_missing_id_returns_false_without_commit() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);
    let make = service.add(&VehicleMake::new("Fiat", "fiat")).unwrap();

    assert!(!service.delete(make.id + 100).unwrap());
    assert!(!uow.has_pending_changes());
    assert!(service.delete(make.id).unwrap());
    assert_eq!(service.get_by_id(make.id).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.delete(-1).unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn paged_listing_defaults_to_name_order() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);
    for name in ["Volvo", "audi", "Mazda"] {
        service.add(&VehicleMake::new(name, "")).unwrap();
    }

    let page = service
        .get_paged(&QueryOptions::new().page(0, -5))
        .unwrap();
    assert_eq!(page.current_page(), 1);
    assert_eq!(page.page_size(), 10);
    let names: Vec<&str> = page.data().iter().map(|make| make.name.as_str()).collect();
    assert_eq!(names, ["audi", "Mazda", "Volvo"]);
}

#[test]
fn get_first_uses_case_insensitive_match() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = MakeService::new(&uow);
    let added = service.add(&VehicleMake::new("Peugeot", "pgt")).unwrap();

    let found = service
        .get_first(&Predicate::field_eq("name", "PEUGEOT"))
        .unwrap();
    assert_eq!(found.id, added.id);
    assert!(service.exists_by_name("peugeot").unwrap());
}

#[test]
fn delete_of_missing_id_keeps_callers_pending_writes() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    uow.makes()
        .add(&VehicleMake::new("Pending", "p"))
        .unwrap();
    assert!(uow.has_pending_changes());

    assert!(!MakeService::new(&uow).delete(4242).unwrap());

    assert!(uow.has_pending_changes());
    let all = uow.makes().get_all(&QueryOptions::new()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(uow.save_changes().unwrap(), 1);
}

#[test]
fn rejected_service_write_keeps_callers_pending_writes() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    uow.makes()
        .add(&VehicleMake::new("Pending", "p"))
        .unwrap();

    let err = MakeService::new(&uow)
        .add(&VehicleMake::new("PENDING", "x"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    assert!(uow.has_pending_changes());
    assert_eq!(uow.save_changes().unwrap(), 1);
}
