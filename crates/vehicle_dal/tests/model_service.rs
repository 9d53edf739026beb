use vehicle_dal::{
    EngineTypeService, ErrorKind, MakeService, ModelService, QueryOptions, UnitOfWork,
    VehicleEngineType, VehicleMake, VehicleModel,
};

#[test]
fn added_model_carries_make_reference_and_name() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let bmw = MakeService::new(&uow)
        .add(&VehicleMake::new("BMW", "bmw"))
        .unwrap();
    let service = ModelService::new(&uow);

    let x5 = service.add(&VehicleModel::new(bmw.id, "X5", "x5")).unwrap();
    assert_eq!(x5.make_id, bmw.id);
    assert_eq!(x5.make_name, "BMW");

    let loaded = service.get_by_id(x5.id).unwrap();
    assert_eq!(loaded.make_id, bmw.id);
}

#[test]
fn missing_make_is_a_validation_error() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let service = ModelService::new(&uow);

    let err = service
        .add(&VehicleModel::new(999, "Ghost", "g"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("999"));

    let err = service.add(&VehicleModel::new(0, "Ghost", "g")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn model_names_are_unique_across_makes() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let makes = MakeService::new(&uow);
    let bmw = makes.add(&VehicleMake::new("BMW", "bmw")).unwrap();
    let mini = makes.add(&VehicleMake::new("Mini", "mini")).unwrap();
    let service = ModelService::new(&uow);
    service.add(&VehicleModel::new(bmw.id, "Cooper", "c")).unwrap();

    let err = service
        .add(&VehicleModel::new(mini.id, "cooper", "c2"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn paged_by_make_lists_only_that_make() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let makes = MakeService::new(&uow);
    let bmw = makes.add(&VehicleMake::new("BMW", "bmw")).unwrap();
    let audi = makes.add(&VehicleMake::new("Audi", "audi")).unwrap();
    let service = ModelService::new(&uow);
    for name in ["X5", "X1", "M3"] {
        service.add(&VehicleModel::new(bmw.id, name, "")).unwrap();
    }
    service.add(&VehicleModel::new(audi.id, "A6", "")).unwrap();

    let page = service
        .get_paged_by_make_id(bmw.id, &QueryOptions::new().page(1, 2))
        .unwrap();
    assert_eq!(page.total_count(), 3);
    assert_eq!(page.total_pages(), 2);
    let names: Vec<&str> = page.data().iter().map(|model| model.name.as_str()).collect();
    assert_eq!(names, ["M3", "X1"]);

    let err = service
        .get_paged_by_make_id(404, &QueryOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn deleting_make_cascades_to_its_models() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let makes = MakeService::new(&uow);
    let bmw = makes.add(&VehicleMake::new("BMW", "bmw")).unwrap();
    let service = ModelService::new(&uow);
    let x5 = service.add(&VehicleModel::new(bmw.id, "X5", "x5")).unwrap();

    assert!(makes.delete(bmw.id).unwrap());
    assert_eq!(service.get_by_id(x5.id).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn engine_type_pairings() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let bmw = MakeService::new(&uow)
        .add(&VehicleMake::new("BMW", "bmw"))
        .unwrap();
    let engines = EngineTypeService::new(&uow);
    let diesel = engines.add(&VehicleEngineType::new("Diesel", "d")).unwrap();
    let petrol = engines.add(&VehicleEngineType::new("Petrol", "p")).unwrap();
    let service = ModelService::new(&uow);
    let x5 = service.add(&VehicleModel::new(bmw.id, "X5", "x5")).unwrap();

    let pair = service.add_engine_type(x5.id, petrol.id).unwrap();
    assert_eq!(pair.model_id, x5.id);
    service.add_engine_type(x5.id, diesel.id).unwrap();

    let err = service.add_engine_type(x5.id, petrol.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let err = service.add_engine_type(x5.id, 999).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let offered: Vec<String> = service
        .engine_types_for_model(x5.id)
        .unwrap()
        .into_iter()
        .map(|engine_type| engine_type.kind)
        .collect();
    assert_eq!(offered, ["Petrol", "Diesel"]);
}
