use vehicle_dal::{EngineTypeService, ErrorKind, QueryOptions, UnitOfWork, VehicleEngineType};

#[test]
fn engine_types_are_unique_by_type_ignoring_case() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = EngineTypeService::new(&uow);
    let diesel = service
        .add(&VehicleEngineType::new("Diesel", "d"))
        .unwrap();

    let err = service
        .add(&VehicleEngineType::new("DIESEL", "dd"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(service.exists_by_type("diesel").unwrap());

    let mut renamed = diesel.clone();
    renamed.abrv = "tdi".to_string();
    assert_eq!(service.update(&renamed).unwrap().abrv, "tdi");
}

#[test]
fn type_is_required() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = EngineTypeService::new(&uow);

    let err = service.add(&VehicleEngineType::new("", "x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!uow.has_pending_changes());
}

#[test]
fn serializes_kind_as_type() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = EngineTypeService::new(&uow);
    let petrol = service
        .add(&VehicleEngineType::new("Petrol", "p"))
        .unwrap();

    let json = serde_json::to_value(&petrol).unwrap();
    assert_eq!(json["type"], "Petrol");
    assert_eq!(json["abrv"], "p");
}

#[test]
fn listing_searches_type_and_abbreviation() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = EngineTypeService::new(&uow);
    for (kind, abrv) in [("Petrol", "p"), ("Hybrid", "hev"), ("Electric", "ev")] {
        service.add(&VehicleEngineType::new(kind, abrv)).unwrap();
    }

    let page = service
        .get_paged(&QueryOptions::new().search("ev"))
        .unwrap();
    let kinds: Vec<&str> = page
        .data()
        .iter()
        .map(|engine_type| engine_type.kind.as_str())
        .collect();
    assert_eq!(kinds, ["Electric", "Hybrid"]);

    assert!(!service.delete(99).unwrap());
}
