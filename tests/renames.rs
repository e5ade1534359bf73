//! Integration tests for natural-key renames: vocabulary rows and parks.

use coaster_top::{
    Catalog, CatalogError, Coaster, FlatRide, InMemoryStore, Park, RecordKey, RecordsExt,
    UNKNOWN_MANUFACTURER, UNRANKED_PARK,
};

fn catalog_with_rides() -> Catalog<InMemoryStore> {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    catalog.add_manufacturer("Intamin").unwrap();
    catalog.add_manufacturer("B&M").unwrap();
    catalog
        .upsert_coaster(Coaster::new("Taron", "Phantasialand", "Intamin"), None, true)
        .unwrap();
    catalog
        .upsert_coaster(Coaster::new("Shambhala", "PortAventura", "B&M"), None, true)
        .unwrap();
    catalog
        .upsert_coaster(Coaster::new("Pantheon", "Busch Gardens", "Intamin"), None, true)
        .unwrap();
    catalog
}

#[test]
fn renaming_a_manufacturer_rewrites_every_referencing_coaster() {
    let mut catalog = catalog_with_rides();

    let rewritten = catalog.rename_manufacturer("Intamin", "Intamin AG").unwrap();
    assert_eq!(rewritten, 2);

    let referencing: Vec<&str> = catalog
        .coasters()
        .iter()
        .filter(|c| c.manufacturer == "Intamin AG")
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(referencing, vec!["Taron", "Pantheon"]);
    assert!(!catalog.coasters().iter().any(|c| c.manufacturer == "Intamin"));

    assert!(catalog.manufacturers().iter().any(|m| m.name == "Intamin AG"));
    assert!(!catalog.manufacturers().iter().any(|m| m.name == "Intamin"));

    // Persisted rows agree with the in-memory view.
    let taron: Coaster = catalog.store().records().get(&RecordKey::Id(1)).unwrap().unwrap();
    assert_eq!(taron.manufacturer, "Intamin AG");
}

#[test]
fn vocabulary_rename_guards() {
    let mut catalog = catalog_with_rides();

    let err = catalog.rename_manufacturer("Mack", "Mack Rides").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownKey { .. }));

    let err = catalog
        .rename_manufacturer(UNKNOWN_MANUFACTURER, "Anything")
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReservedRow { .. }));

    let err = catalog.rename_manufacturer("Intamin", "B&M").unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKey { .. }));

    // Nothing was rewritten by the rejected renames.
    assert_eq!(
        catalog
            .coasters()
            .iter()
            .filter(|c| c.manufacturer == "Intamin")
            .count(),
        2
    );
}

#[test]
fn renaming_a_model_rewrites_referencing_coasters() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    catalog.add_model("Wing Coaster").unwrap();
    let mut coaster = Coaster::new("Fenix", "Toverland", "B&M");
    coaster.model = Some("Wing Coaster".to_string());
    catalog.upsert_coaster(coaster, None, true).unwrap();

    let rewritten = catalog.rename_model("Wing Coaster", "Wing").unwrap();
    assert_eq!(rewritten, 1);
    assert_eq!(catalog.coasters()[0].model.as_deref(), Some("Wing"));
    assert!(catalog.models().iter().any(|m| m.name == "Wing"));
    assert!(!catalog.models().iter().any(|m| m.name == "Wing Coaster"));
}

#[test]
fn renaming_a_flat_manufacturer_touches_only_the_flat_side() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    // Same name in both vocabularies; only the flat side should move.
    catalog.add_manufacturer("Huss").unwrap();
    catalog.add_flat_manufacturer("Huss").unwrap();
    catalog
        .upsert_coaster(Coaster::new("Condor 2G", "Walibi", "Huss"), None, true)
        .unwrap();
    catalog
        .upsert_flat(FlatRide::new("Talocan", "Phantasialand", "Huss"), None, true)
        .unwrap();

    let rewritten = catalog.rename_flat_manufacturer("Huss", "Huss Rides").unwrap();
    assert_eq!(rewritten, 1);

    assert_eq!(catalog.flats()[0].manufacturer, "Huss Rides");
    assert!(catalog
        .flat_manufacturers()
        .iter()
        .any(|m| m.name == "Huss Rides"));
    assert!(!catalog.flat_manufacturers().iter().any(|m| m.name == "Huss"));

    assert_eq!(catalog.coasters()[0].manufacturer, "Huss");
    assert!(catalog.manufacturers().iter().any(|m| m.name == "Huss"));
    assert!(!catalog.manufacturers().iter().any(|m| m.name == "Huss Rides"));
}

#[test]
fn renaming_a_flat_model_rewrites_referencing_flats() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    catalog.add_flat_model("Top Spin").unwrap();
    let mut flat = FlatRide::new("Talocan", "Phantasialand", "Huss");
    flat.model = Some("Top Spin".to_string());
    catalog.upsert_flat(flat, None, true).unwrap();

    let rewritten = catalog.rename_flat_model("Top Spin", "Suspended Top Spin").unwrap();
    assert_eq!(rewritten, 1);
    assert_eq!(catalog.flats()[0].model.as_deref(), Some("Suspended Top Spin"));
    assert!(catalog
        .flat_models()
        .iter()
        .any(|m| m.name == "Suspended Top Spin"));
    assert!(!catalog.flat_models().iter().any(|m| m.name == "Top Spin"));
    // The coaster model vocabulary never saw the rename.
    assert!(!catalog.models().iter().any(|m| m.name == "Suspended Top Spin"));
}

#[test]
fn renaming_a_park_rewrites_rides_and_keeps_its_rank() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    for name in ["Gardaland", "Mirabilandia", "Cinecitta World"] {
        catalog.upsert_park(Park::new(name), None, true).unwrap();
    }
    catalog
        .upsert_coaster(Coaster::new("Oblivion", "Mirabilandia", "B&M"), None, true)
        .unwrap();
    catalog
        .upsert_flat(FlatRide::new("Discovery", "Mirabilandia", "Zamperla"), None, true)
        .unwrap();

    catalog.rename_park("Mirabilandia", "Mirabilandia Resort").unwrap();

    let names: Vec<&str> = catalog.parks().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Gardaland", "Mirabilandia Resort", "Cinecitta World", UNRANKED_PARK]
    );
    let ranks: Vec<u32> = catalog
        .parks()
        .iter()
        .filter(|p| !p.reserved)
        .map(|p| p.rank)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert_eq!(catalog.coasters()[0].park, "Mirabilandia Resort");
    assert_eq!(catalog.flats()[0].park, "Mirabilandia Resort");

    // The old row is really gone from storage.
    let old: Option<Park> = catalog
        .store()
        .records()
        .get(&RecordKey::from("Mirabilandia"))
        .unwrap();
    assert!(old.is_none());
}

#[test]
fn park_rename_carries_country_and_visit_count() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    let mut park = Park::new("Heide Park");
    park.country = Some("DE".to_string());
    park.visit_count = 4;
    catalog.upsert_park(park, None, true).unwrap();

    catalog.rename_park("Heide Park", "Heide Park Resort").unwrap();

    let renamed = catalog
        .parks()
        .iter()
        .find(|p| p.name == "Heide Park Resort")
        .unwrap();
    assert_eq!(renamed.country.as_deref(), Some("DE"));
    assert_eq!(renamed.visit_count, 4);
    assert_eq!(renamed.rank, 1);
}

#[test]
fn park_rename_guards() {
    let mut catalog = Catalog::open(InMemoryStore::new()).unwrap();
    catalog.upsert_park(Park::new("Efteling"), None, true).unwrap();
    catalog.upsert_park(Park::new("Walibi"), None, true).unwrap();

    let err = catalog.rename_park("Nowhere", "Somewhere").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownKey { .. }));

    let err = catalog.rename_park(UNRANKED_PARK, "Elsewhere").unwrap_err();
    assert!(matches!(err, CatalogError::ReservedRow { .. }));

    let err = catalog.rename_park("Efteling", "Walibi").unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKey { .. }));
}
