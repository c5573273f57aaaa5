use std::fs;

use precon_synergy::catalog::{CatalogError, TemplateCatalog};
use precon_synergy::{Collection, ColorIdentity, JsonTemplateStore};

#[test]
fn store_seeds_once_and_serves_filters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonTemplateStore::new(dir.path().join("templates.json"));

    let catalog = store.load_or_seed().expect("seeded");
    let persisted = fs::read_to_string(store.path()).expect("store written");
    assert!(persisted.contains("Eldrazi Unbound"));

    assert_eq!(catalog.get_by_year(2024).len(), 10);
    assert!(catalog.get_by_year(2023).is_empty());
    let selesnya: ColorIdentity = "GW".parse().expect("identity");
    assert_eq!(catalog.get_by_colors(selesnya)[0].name, "Scrappy Survivors");

    let again = store.load_or_seed().expect("reloaded");
    assert_eq!(again.get_all(), catalog.get_all());
}

#[test]
fn invalid_records_in_the_store_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("templates.json");
    fs::write(
        &path,
        r#"[{"name":"Broken","set_code":"XXX","year":2024,"commanders":["Someone"],
            "color_identity":["W"],"themes":[],"archetype":"","key_pieces":[]}]"#,
    )
    .expect("write store");

    let err = JsonTemplateStore::new(&path)
        .load_or_seed()
        .expect_err("themeless template rejected");
    assert!(matches!(err, CatalogError::InvalidTemplate(_)));
}

#[test]
fn csv_collection_round_trips_through_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = "name,quantity\nDoubling Season,1\nHardened Scales,\nDoubling Season,1\n";
    let collection = Collection::from_csv_reader("Tokens", csv.as_bytes()).expect("csv parses");
    assert_eq!(collection.owned_names(), vec!["Doubling Season", "Hardened Scales"]);
    assert_eq!(collection.total_quantity(), 3);

    let path = dir.path().join("tokens.json");
    collection.save(&path).expect("save");
    assert_eq!(Collection::load(&path).expect("load"), collection);
}
