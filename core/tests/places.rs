//! Geographic catalog: weighted draws, filters, lookups, cache lifecycle.

use std::collections::HashSet;
use std::sync::Arc;

use itfaker_core::{
    dataset::{DataSource, Dataset, DirectoryData, EmbeddedData},
    places::{CityFilter, PlacesCatalog},
    rng::FakerRng,
    FakerError, FakerResult,
};

#[test]
fn random_cities_are_distinct() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(1);
    let cities = catalog.random_cities(&mut rng, 20).unwrap();
    assert_eq!(cities.len(), 20);

    let codes: HashSet<&str> = cities.iter().map(|c| c.belfiore_code.as_str()).collect();
    assert_eq!(codes.len(), 20, "random_cities returned duplicates");
}

#[test]
fn whole_catalog_can_be_drawn() {
    let catalog = PlacesCatalog::embedded();
    let total = catalog.len().unwrap();
    let mut rng = FakerRng::seeded(2);
    let cities = catalog.random_cities(&mut rng, total).unwrap();
    assert_eq!(cities.len(), total);
}

#[test]
fn requesting_more_cities_than_exist_fails_fast() {
    let catalog = PlacesCatalog::embedded();
    let total = catalog.len().unwrap();
    let mut rng = FakerRng::seeded(3);
    match catalog.random_cities(&mut rng, total + 1) {
        Err(FakerError::CountExceedsCatalog { requested, available }) => {
            assert_eq!(requested, total + 1);
            assert_eq!(available, total);
        }
        other => panic!("expected CountExceedsCatalog, got {other:?}"),
    }
}

#[test]
fn region_filter_only_returns_that_region() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(4);
    let filter = CityFilter::default().region("lombardia");
    for _ in 0..200 {
        let city = catalog.city(&mut rng, &filter).unwrap().unwrap();
        assert_eq!(city.region.name, "Lombardia", "{} is not in Lombardia", city.name);
    }
}

#[test]
fn province_filter_wins_over_region() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(5);
    let filter = CityFilter::default().region("Lombardia").province("VARESE");
    for _ in 0..100 {
        let city = catalog.city(&mut rng, &filter).unwrap().unwrap();
        assert_eq!(city.province.name, "Varese");
    }
}

#[test]
fn unknown_province_widens_to_region() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(6);
    let filter = CityFilter::default().region("Sardegna").province("Atlantide");
    for _ in 0..50 {
        let city = catalog.city(&mut rng, &filter).unwrap().unwrap();
        assert_eq!(city.region.name, "Sardegna");
    }
}

#[test]
fn unknown_region_widens_to_whole_catalog() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(7);
    let filter = CityFilter::default().region("Atlantide");
    assert!(catalog.city(&mut rng, &filter).unwrap().is_some());
}

#[test]
fn exact_filters_are_case_insensitive_and_never_substitute() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(8);

    let rome = catalog
        .city(&mut rng, &CityFilter::default().belfiore_code("h501"))
        .unwrap()
        .expect("H501 is Roma");
    assert_eq!(rome.name, "Roma");
    assert_eq!(rome.province_code, "RM");

    let milan = catalog
        .city(&mut rng, &CityFilter::default().city_name("MILANO"))
        .unwrap()
        .expect("Milano by name");
    assert_eq!(milan.belfiore_code, "F205");

    let missing = catalog
        .city(&mut rng, &CityFilter::default().city_name("Atlantide").region("Lazio"))
        .unwrap();
    assert!(missing.is_none(), "Unknown exact name must not fall back");

    assert!(catalog.city_by_belfiore("Z999").unwrap().is_none());
}

#[test]
fn population_weighting_favours_large_cities() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(9);
    let mut rome = 0;
    let mut sondrio = 0;
    for _ in 0..5_000 {
        match catalog.random_city(&mut rng).unwrap().name.as_str() {
            "Roma" => rome += 1,
            "Sondrio" => sondrio += 1,
            _ => {}
        }
    }
    assert!(rome > sondrio * 10, "Roma drawn {rome} times, Sondrio {sondrio}");
}

#[test]
fn most_populated_is_sorted_and_truncated() {
    let catalog = PlacesCatalog::embedded();
    let top = catalog.most_populated(5).unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].name, "Roma");
    assert!(top.windows(2).all(|w| w[0].population >= w[1].population));

    let all = catalog.most_populated(10_000).unwrap();
    assert_eq!(all.len(), catalog.len().unwrap());
}

#[test]
fn countries_resolve_by_either_name() {
    let catalog = PlacesCatalog::embedded();
    let fr = catalog.country("francia").unwrap().expect("Francia");
    let en = catalog.country("FRANCE").unwrap().expect("France");
    assert_eq!(fr, en);
    assert_eq!(fr.at_code, "Z110");
    assert_eq!(fr.iso3166_alpha2, "FR");

    assert!(catalog.country("Atlantide").unwrap().is_none());
}

#[test]
fn random_province_and_birth_place_come_from_real_cities() {
    let catalog = PlacesCatalog::embedded();
    let mut rng = FakerRng::seeded(10);

    let province = catalog.province(&mut rng).unwrap();
    assert_eq!(province.code.len(), 2, "{province:?}");

    let place = catalog.birth_place(&mut rng).unwrap();
    let city = catalog.city_by_belfiore(&place.belfiore_code).unwrap().unwrap();
    assert_eq!(city.name, place.name);
    assert_eq!(city.region.name, place.region);

    let country = catalog.random_country(&mut rng).unwrap();
    assert!(country.at_code.starts_with('Z'));
}

#[test]
fn cache_clears_and_reloads() {
    let catalog = PlacesCatalog::embedded();
    assert!(!catalog.is_loaded());
    catalog.preload().unwrap();
    assert!(catalog.is_loaded());

    catalog.clear_cache();
    assert!(!catalog.is_loaded());

    let mut rng = FakerRng::seeded(11);
    catalog.random_city(&mut rng).unwrap();
    assert!(catalog.is_loaded());
}

#[test]
fn failed_load_surfaces_error_and_is_retried() {
    let catalog = PlacesCatalog::new(Arc::new(DirectoryData::new("/nonexistent/itfaker")));
    let mut rng = FakerRng::seeded(12);
    match catalog.random_city(&mut rng) {
        Err(FakerError::DataLoad { dataset, .. }) => assert_eq!(dataset, Dataset::Cities),
        other => panic!("expected DataLoad, got {other:?}"),
    }
    assert!(!catalog.is_loaded());
    assert!(catalog.random_city(&mut rng).is_err(), "Still failing on retry");
}

#[test]
fn directory_data_in_the_embedded_schema_loads() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    let from_disk = PlacesCatalog::new(Arc::new(DirectoryData::new(dir)));
    let embedded = PlacesCatalog::embedded();
    assert_eq!(from_disk.len().unwrap(), embedded.len().unwrap());
    assert_eq!(
        from_disk.city_by_belfiore("H501").unwrap(),
        embedded.city_by_belfiore("H501").unwrap()
    );
}

/// Source that fails its first read, then serves the embedded data.
struct FlakySource {
    failed_once: std::sync::atomic::AtomicBool,
}

impl DataSource for FlakySource {
    fn read(&self, dataset: Dataset) -> FakerResult<String> {
        if !self.failed_once.swap(true, std::sync::atomic::Ordering::SeqCst) {
            return Err(FakerError::DataLoad {
                dataset,
                message: "transient".into(),
            });
        }
        EmbeddedData.read(dataset)
    }

    fn describe(&self) -> String {
        "flaky".into()
    }
}

#[test]
fn load_recovers_after_transient_failure() {
    let catalog = PlacesCatalog::new(Arc::new(FlakySource {
        failed_once: std::sync::atomic::AtomicBool::new(false),
    }));
    assert!(catalog.preload().is_err());
    assert!(!catalog.is_loaded());
    catalog.preload().unwrap();
    assert!(catalog.len().unwrap() > 0);
}

#[test]
fn concurrent_first_use_shares_one_load() {
    let catalog = Arc::new(PlacesCatalog::embedded());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || {
                let mut rng = FakerRng::seeded(i);
                catalog.random_city(&mut rng).map(|c| c.name)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
    assert!(catalog.is_loaded());
}
