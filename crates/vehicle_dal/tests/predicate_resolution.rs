use chrono::NaiveDate;
use vehicle_dal::{
    FieldMatch, Predicate, Repository, ResolutionTier, UnitOfWork, VehicleMake, VehicleOwner,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn seeded() -> UnitOfWork {
    let uow = UnitOfWork::open_in_memory().unwrap();
    for (name, abrv) in [("BMW", "bmw"), ("Audi", "aud"), ("Skoda", "sk")] {
        uow.makes().add(&VehicleMake::new(name, abrv)).unwrap();
    }
    for (first, last, born) in [
        ("Ana", "Horvat", date(1990, 3, 7)),
        ("Ivan", "Horvat", date(1985, 11, 2)),
        ("Ana", "Kovac", date(2001, 6, 30)),
    ] {
        uow.owners()
            .add(&VehicleOwner::new(first, last, born))
            .unwrap();
    }
    uow.save_changes().unwrap();
    uow
}

#[test]
fn tiers_follow_predicate_shape() {
    let uow = seeded();
    let makes = uow.makes();

    assert_eq!(makes.explain(&Predicate::by_id(1)), ResolutionTier::Identity);
    assert_eq!(
        makes.explain(&Predicate::field_eq("Id", 1_i64)),
        ResolutionTier::Identity
    );
    assert_eq!(
        makes.explain(&Predicate::field_eq("Name", "bmw")),
        ResolutionTier::NativeField
    );
    assert_eq!(
        makes.explain(&Predicate::field_eq("Abrv", "bmw")),
        ResolutionTier::FullScan
    );
    assert_eq!(
        makes.explain(&Predicate::custom(|make: &VehicleMake| make.name.len() > 3)),
        ResolutionTier::FullScan
    );
    assert_eq!(
        uow.owners().explain(&Predicate::all_of([
            FieldMatch::new("FirstName", "ana"),
            FieldMatch::new("LastName", "kovac"),
        ])),
        ResolutionTier::NativeField
    );
}

#[test]
fn native_and_scan_tiers_agree() {
    let uow = seeded();
    let makes = uow.makes();
    let owners = uow.owners();

    let make_predicates = [
        Predicate::by_id(2),
        Predicate::field_eq("Name", "bmw"),
        Predicate::field_eq("name", "SKODA"),
        Predicate::field_eq("Name", "Opel"),
    ];
    for predicate in &make_predicates {
        assert_eq!(
            makes.find_first(predicate).unwrap(),
            makes.find_first_scanning(predicate).unwrap(),
            "find_first diverged for {predicate:?}"
        );
        assert_eq!(
            makes.exists(predicate).unwrap(),
            makes.exists_scanning(predicate).unwrap(),
            "exists diverged for {predicate:?}"
        );
    }

    let owner_predicates = [
        Predicate::field_eq("LastName", "horvat"),
        Predicate::field_eq("first_name", "ANA"),
        Predicate::all_of([
            FieldMatch::new("FirstName", "ana"),
            FieldMatch::new("LastName", "KOVAC"),
        ]),
        Predicate::all_of([
            FieldMatch::new("FirstName", "Ivan"),
            FieldMatch::new("LastName", "Kovac"),
        ]),
    ];
    for predicate in &owner_predicates {
        assert_eq!(
            owners.find_first(predicate).unwrap(),
            owners.find_first_scanning(predicate).unwrap(),
            "find_first diverged for {predicate:?}"
        );
        assert_eq!(
            owners.exists(predicate).unwrap(),
            owners.exists_scanning(predicate).unwrap(),
            "exists diverged for {predicate:?}"
        );
    }
}

#[test]
fn find_first_returns_lowest_identity_match() {
    let uow = seeded();

    let horvat = uow
        .owners()
        .find_first(&Predicate::field_eq("LastName", "Horvat"))
        .unwrap()
        .unwrap();
    assert_eq!(horvat.first_name, "Ana");

    let ana = uow
        .owners()
        .find_first(&Predicate::field_eq("FirstName", "Ana"))
        .unwrap()
        .unwrap();
    assert_eq!(ana.last_name, "Horvat");
}

#[test]
fn scan_tier_handles_arbitrary_conditions() {
    let uow = seeded();

    let born_after_2000 = Predicate::custom(|owner: &VehicleOwner| {
        owner
            .date_of_birth
            .is_some_and(|born| born > NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
    });
    let young = uow.owners().find_first(&born_after_2000).unwrap().unwrap();
    assert_eq!(young.last_name, "Kovac");

    let by_dob = Predicate::field_eq("DateOfBirth", date(1985, 11, 2));
    assert_eq!(uow.owners().explain(&by_dob), ResolutionTier::FullScan);
    assert_eq!(
        uow.owners().find_first(&by_dob).unwrap().unwrap().first_name,
        "Ivan"
    );

    assert!(!uow
        .makes()
        .exists(&Predicate::field_eq("NoSuchField", "x"))
        .unwrap());
}

#[test]
fn identity_lookups_return_none_for_missing_rows() {
    let uow = seeded();
    assert!(uow.makes().find_first(&Predicate::by_id(99)).unwrap().is_none());
    assert!(!uow.makes().exists(&Predicate::field_eq("Id", 99_i64)).unwrap());
    assert!(uow.makes().exists(&Predicate::by_id(1)).unwrap());
}
