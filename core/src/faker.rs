//! ItFaker: the wired-up generator.
//!
//! Owns one deterministic stream per `StreamSlot`, all derived from a
//! single master seed, and shares the catalogs through `Arc` so several
//! fakers can draw from one loaded copy of the reference data.
//!
//! RULES:
//!   - Each operation draws only from its own slot's stream.
//!   - Catalogs never hold randomness.
//!   - Same config (seed included) → same sequence of results.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    address::{AddressGenerator, AddressOptions},
    config::FakerConfig,
    dataset::{DataSource, DirectoryData, EmbeddedData},
    error::FakerResult,
    first_name::{FirstNameCatalog, FirstNameDraw, FirstNameOptions},
    fiscal_code::FiscalCode,
    last_name::{LastNameCatalog, LastNameOptions},
    person::{FiscalCodeOptions, ItalianPerson, PersonComposer, PersonOptions},
    places::{CityFilter, PlacesCatalog},
    rng::{FakerRng, RngBank, StreamSlot},
    types::{City, Country, Gender},
};

struct Streams {
    places: FakerRng,
    first_name: FakerRng,
    last_name: FakerRng,
    person: FakerRng,
    fiscal_code: FakerRng,
    address: FakerRng,
    contacts: FakerRng,
}

impl Streams {
    fn from_bank(bank: &RngBank) -> Self {
        Self {
            places: bank.for_slot(StreamSlot::Places),
            first_name: bank.for_slot(StreamSlot::FirstName),
            last_name: bank.for_slot(StreamSlot::LastName),
            person: bank.for_slot(StreamSlot::Person),
            fiscal_code: bank.for_slot(StreamSlot::FiscalCode),
            address: bank.for_slot(StreamSlot::Address),
            contacts: bank.for_slot(StreamSlot::Contacts),
        }
    }
}

pub struct ItFaker {
    pub rng_bank: RngBank,
    places: Arc<PlacesCatalog>,
    first_names: Arc<FirstNameCatalog>,
    last_names: Arc<LastNameCatalog>,
    addresses: Arc<AddressGenerator>,
    composer: PersonComposer,
    default_min_age: u32,
    default_max_age: u32,
    streams: Streams,
}

impl ItFaker {
    /// Build a fully wired faker from `config`.
    /// Reference data is loaded lazily on first use.
    pub fn build(config: &FakerConfig) -> FakerResult<Self> {
        let source: Arc<dyn DataSource> = match &config.data_dir {
            Some(dir) => Arc::new(DirectoryData::new(dir)),
            None => Arc::new(EmbeddedData),
        };
        let seed = config.resolved_seed();
        let reference_date = config.resolved_reference_date();
        log::info!(
            "itfaker: seed {seed}, reference date {reference_date}, data from {}",
            source.describe()
        );

        let places = Arc::new(PlacesCatalog::new(Arc::clone(&source)));
        let first_names = Arc::new(FirstNameCatalog::new(Arc::clone(&source)));
        let last_names = Arc::new(
            LastNameCatalog::new(source).with_regional_weight(config.regional_surname_weight),
        );
        Self::with_catalogs(config, seed, reference_date, places, first_names, last_names)
    }

    /// Faker over shared, possibly already loaded, catalogs.
    pub fn with_catalogs(
        config: &FakerConfig,
        seed: u64,
        reference_date: NaiveDate,
        places: Arc<PlacesCatalog>,
        first_names: Arc<FirstNameCatalog>,
        last_names: Arc<LastNameCatalog>,
    ) -> FakerResult<Self> {
        let addresses = Arc::new(
            AddressGenerator::new(Arc::clone(&places), Arc::clone(&last_names))?
                .with_rates(config.building_suffix_rate, config.apartment_detail_rate),
        );
        let composer = PersonComposer::new(
            Arc::clone(&places),
            Arc::clone(&first_names),
            Arc::clone(&last_names),
            Arc::clone(&addresses),
            reference_date,
        );
        let rng_bank = RngBank::new(seed);
        let streams = Streams::from_bank(&rng_bank);

        Ok(Self {
            rng_bank,
            places,
            first_names,
            last_names,
            addresses,
            composer,
            default_min_age: config.default_min_age,
            default_max_age: config.default_max_age,
            streams,
        })
    }

    /// Fixed seed and reference date, embedded data.
    pub fn build_test() -> FakerResult<Self> {
        Self::build(&FakerConfig::default_test())
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.composer.reference_date()
    }

    /// Load every catalog now instead of on first draw.
    pub fn preload(&self) -> FakerResult<()> {
        self.places.preload()?;
        self.first_names.preload()?;
        self.last_names.preload()
    }

    pub fn clear_caches(&self) {
        self.places.clear_cache();
        self.first_names.clear_cache();
        self.last_names.clear_cache();
    }

    pub fn places(&self) -> &Arc<PlacesCatalog> {
        &self.places
    }

    pub fn first_names(&self) -> &Arc<FirstNameCatalog> {
        &self.first_names
    }

    pub fn last_names(&self) -> &Arc<LastNameCatalog> {
        &self.last_names
    }

    pub fn addresses(&self) -> &Arc<AddressGenerator> {
        &self.addresses
    }

    // ── Names ─────────────────────────────────────────────────────────

    pub fn first_name(&mut self, options: &FirstNameOptions) -> FakerResult<String> {
        self.composer.first_name(&mut self.streams.first_name, options)
    }

    /// Like `first_name`, but also reports the gender drawn.
    pub fn first_name_draw(&mut self, options: &FirstNameOptions) -> FakerResult<FirstNameDraw> {
        self.first_names.first_name(&mut self.streams.first_name, options)
    }

    pub fn last_name(&mut self, options: &LastNameOptions) -> FakerResult<String> {
        self.composer.last_name(&mut self.streams.last_name, options)
    }

    pub fn full_name(&mut self, options: &FirstNameOptions) -> FakerResult<String> {
        self.composer.full_name(&mut self.streams.person, options)
    }

    pub fn title(&mut self, gender: Option<Gender>) -> String {
        self.composer.title(&mut self.streams.first_name, gender)
    }

    // ── Person ────────────────────────────────────────────────────────

    pub fn generate_person(&mut self, options: &PersonOptions) -> FakerResult<ItalianPerson> {
        self.composer.generate_person(&mut self.streams.person, options)
    }

    /// A person with the configured default age bounds.
    pub fn person(&mut self) -> FakerResult<ItalianPerson> {
        let options = PersonOptions {
            min_age: self.default_min_age,
            max_age: self.default_max_age,
            ..PersonOptions::default()
        };
        self.generate_person(&options)
    }

    pub fn fiscal_code(&mut self, options: &FiscalCodeOptions) -> FakerResult<FiscalCode> {
        self.composer.fiscal_code(&mut self.streams.fiscal_code, options)
    }

    pub fn birth_date(&mut self, min_age: u32, max_age: u32) -> FakerResult<NaiveDate> {
        self.composer.birth_date(&mut self.streams.person, min_age, max_age)
    }

    // ── Contacts ──────────────────────────────────────────────────────

    pub fn phone(&mut self) -> String {
        self.composer.phone(&mut self.streams.contacts)
    }

    pub fn landline(&mut self) -> String {
        self.composer.landline(&mut self.streams.contacts)
    }

    pub fn email(&mut self, first_name: Option<&str>, last_name: Option<&str>) -> FakerResult<String> {
        self.composer.email(&mut self.streams.contacts, first_name, last_name)
    }

    pub fn pec(&mut self, first_name: Option<&str>, last_name: Option<&str>) -> FakerResult<String> {
        self.composer.pec(&mut self.streams.contacts, first_name, last_name)
    }

    // ── Places ────────────────────────────────────────────────────────

    pub fn complete_address(&mut self, options: &AddressOptions) -> FakerResult<String> {
        self.addresses.complete_address(&mut self.streams.address, options)
    }

    pub fn street_address(&mut self, options: &AddressOptions) -> FakerResult<String> {
        self.addresses.street_address(&mut self.streams.address, options)
    }

    pub fn random_city(&mut self) -> FakerResult<City> {
        self.places.random_city(&mut self.streams.places)
    }

    pub fn random_cities(&mut self, count: usize) -> FakerResult<Vec<City>> {
        self.places.random_cities(&mut self.streams.places, count)
    }

    pub fn city(&mut self, filter: &CityFilter) -> FakerResult<Option<City>> {
        self.places.city(&mut self.streams.places, filter)
    }

    pub fn country(&self, name: &str) -> FakerResult<Option<Country>> {
        self.places.country(name)
    }

    pub fn random_country(&mut self) -> FakerResult<Country> {
        self.places.random_country(&mut self.streams.places)
    }
}
