//! Street addresses: weighted street type, a plausible street name, a
//! building number, and the postal line of a real municipality.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::FakerResult,
    last_name::{LastNameCatalog, LastNameOptions},
    places::{CityFilter, PlacesCatalog},
    rng::FakerRng,
    types::WeightedItem,
    weighted::WeightedSelector,
};

/// Street types with relative frequencies, in tenths.
const STREET_TYPES: &[(&str, u64)] = &[
    ("Via", 700),
    ("Viale", 80),
    ("Piazza", 80),
    ("Corso", 50),
    ("Largo", 30),
    ("Vicolo", 20),
    ("Lungomare", 10),
    ("Strada", 10),
    ("Salita", 5),
    ("Calata", 5),
    ("Galleria", 5),
    ("Borgo", 3),
    ("Traversa", 2),
];

const HISTORICAL_FIGURES: &[&str] = &[
    "Giuseppe Garibaldi",
    "Giuseppe Mazzini",
    "Vittorio Emanuele",
    "Dante Alighieri",
    "Leonardo da Vinci",
    "Cristoforo Colombo",
    "Alessandro Manzoni",
    "Galileo Galilei",
];

const SAINTS: &[&str] = &[
    "San Francesco",
    "San Giovanni",
    "Santa Maria",
    "San Giuseppe",
    "Sant'Antonio",
    "San Marco",
    "Santa Chiara",
    "San Pietro",
];

const DATES: &[&str] = &[
    "XX Settembre",
    "IV Novembre",
    "XXV Aprile",
    "II Giugno",
    "I Maggio",
    "VIII Agosto",
];

const CULTURAL_REFERENCES: &[&str] = &[
    "Roma",
    "Venezia",
    "Milano",
    "Napoli",
    "dei Mille",
    "delle Grazie",
    "della Repubblica",
    "della Libertà",
    "della Costituzione",
    "della Pace",
    "dell'Indipendenza",
    "dell'Unità",
    "Verdi",
    "Rossini",
    "Puccini",
];

const GEOGRAPHIC_REFERENCES: &[&str] = &[
    "Monte Bianco",
    "Vesuvio",
    "Etna",
    "Dolomiti",
    "Tevere",
    "Po",
    "Arno",
    "Mediterraneo",
];

const BUILDING_SUFFIXES: &[&str] = &["A", "B", "/a", "/b", "bis"];
const STAIRCASES: &[&str] = &["A", "B", "C"];
const INTERNAL_LETTERS: &[&str] = &["a", "b"];
const INTERNAL_LETTER_RATE: f64 = 0.2;

pub const DEFAULT_BUILDING_SUFFIX_RATE: f64 = 0.05;
pub const DEFAULT_APARTMENT_DETAIL_RATE: f64 = 0.05;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressOptions {
    pub region: Option<String>,
}

fn base_patterns() -> impl Iterator<Item = &'static str> {
    HISTORICAL_FIGURES
        .iter()
        .chain(SAINTS)
        .chain(DATES)
        .chain(CULTURAL_REFERENCES)
        .chain(GEOGRAPHIC_REFERENCES)
        .copied()
}

pub struct AddressGenerator {
    places: Arc<PlacesCatalog>,
    last_names: Arc<LastNameCatalog>,
    street_types: WeightedSelector<&'static str>,
    building_suffix_rate: f64,
    apartment_detail_rate: f64,
}

impl AddressGenerator {
    pub fn new(places: Arc<PlacesCatalog>, last_names: Arc<LastNameCatalog>) -> FakerResult<Self> {
        let street_types = WeightedSelector::new(
            STREET_TYPES
                .iter()
                .map(|&(name, weight)| WeightedItem::new(name, weight))
                .collect(),
        )?;
        Ok(Self {
            places,
            last_names,
            street_types,
            building_suffix_rate: DEFAULT_BUILDING_SUFFIX_RATE,
            apartment_detail_rate: DEFAULT_APARTMENT_DETAIL_RATE,
        })
    }

    pub fn with_rates(mut self, building_suffix_rate: f64, apartment_detail_rate: f64) -> Self {
        self.building_suffix_rate = building_suffix_rate.clamp(0.0, 1.0);
        self.apartment_detail_rate = apartment_detail_rate.clamp(0.0, 1.0);
        self
    }

    pub fn street_type(&self, rng: &mut FakerRng) -> &'static str {
        *self.street_types.select(rng)
    }

    /// A street name. With a region, one of the region's surnames joins
    /// the candidate pool as a local notable.
    pub fn street_name(&self, rng: &mut FakerRng, region: Option<&str>) -> FakerResult<String> {
        let mut candidates: Vec<String> = base_patterns().map(str::to_string).collect();
        if let Some(region) = region {
            let options = LastNameOptions {
                region: Some(region.to_string()),
                province: None,
            };
            candidates.push(self.last_names.last_name(rng, &options)?);
        }
        Ok(rng.pick(&candidates).clone())
    }

    /// `"1"`–`"300"`, occasionally with a suffix such as `bis` or `/a`.
    pub fn building_number(&self, rng: &mut FakerRng) -> String {
        let number = rng.next_i64_between(1, 300);
        if rng.chance(self.building_suffix_rate) {
            format!("{number}{}", rng.pick(BUILDING_SUFFIXES))
        } else {
            number.to_string()
        }
    }

    /// `"Scala B, Piano 3, Interno 12a"`.
    pub fn apartment_details(&self, rng: &mut FakerRng) -> String {
        let staircase = rng.pick(STAIRCASES);
        let floor = rng.next_i64_between(0, 8);
        let internal = rng.next_i64_between(1, 15);
        let letter = if rng.chance(INTERNAL_LETTER_RATE) {
            *rng.pick(INTERNAL_LETTERS)
        } else {
            ""
        };
        format!("Scala {staircase}, Piano {floor}, Interno {internal}{letter}")
    }

    /// `"Via Giuseppe Garibaldi, 12"`.
    pub fn street_address(&self, rng: &mut FakerRng, options: &AddressOptions) -> FakerResult<String> {
        let name = self.street_name(rng, options.region.as_deref())?;
        let street_type = self.street_type(rng);
        let number = self.building_number(rng);
        Ok(format!("{street_type} {name}, {number}"))
    }

    /// `"Via Roma, 5, 00118 Roma (RM)"`, with the city drawn from the
    /// requested region, or nationwide.
    pub fn complete_address(&self, rng: &mut FakerRng, options: &AddressOptions) -> FakerResult<String> {
        let street = self.street_address(rng, options)?;
        let city = match &options.region {
            Some(region) => self.places.city(rng, &CityFilter::default().region(region.clone()))?,
            None => Some(self.places.random_city(rng)?),
        };

        let mut line = street;
        if rng.chance(self.apartment_detail_rate) {
            line.push(' ');
            line.push_str(&self.apartment_details(rng));
        }

        match city {
            Some(city) => {
                let cap = match city.primary_postal_code() {
                    Some(cap) => cap.to_string(),
                    None => rng.digits(5),
                };
                Ok(format!("{line}, {cap} {} ({})", city.name, city.province_code))
            }
            // Unreachable with a region-only filter.
            None => Ok(format!("{line}, {}", rng.digits(5))),
        }
    }
}
