//! Composes a complete, internally consistent Italian identity.
//!
//! The birthplace is resolved once and the very same name, surname, gender,
//! date, and cadastral code are fed into the fiscal code, so a generated
//! code always decodes back to the person it belongs to.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    address::{AddressGenerator, AddressOptions},
    contacts::{self, Contacts},
    error::{FakerError, FakerResult},
    first_name::{self, FirstNameCatalog, FirstNameOptions},
    fiscal_code::{FiscalCode, FiscalCodeInput},
    last_name::{LastNameCatalog, LastNameOptions},
    places::{CityFilter, PlacesCatalog},
    rng::FakerRng,
    types::{BirthPlace, Gender},
};

pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonOptions {
    pub gender: Option<Gender>,
    pub min_age: u32,
    pub max_age: u32,
    pub with_title: bool,
    pub region: Option<String>,
    pub province: Option<String>,
}

impl Default for PersonOptions {
    fn default() -> Self {
        Self {
            gender: None,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            with_title: false,
            region: None,
            province: None,
        }
    }
}

/// An explicitly requested birthplace. Must resolve; nothing is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BirthPlaceRef {
    Belfiore(String),
    CityName(String),
    Country(String),
}

/// Fields left empty are drawn at random.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalCodeOptions {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<BirthPlaceRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItalianPerson {
    pub full_name: String,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub birth_place: BirthPlace,
    pub fiscal_code: FiscalCode,
    pub contacts: Contacts,
    pub address: String,
}

/// A uniformly drawn birth date such that the age on `reference` lies in
/// `[min_age, max_age]`.
pub fn birth_date(
    rng: &mut FakerRng,
    min_age: u32,
    max_age: u32,
    reference: NaiveDate,
) -> FakerResult<NaiveDate> {
    let invalid = || FakerError::InvalidAgeRange { min_age, max_age };
    if min_age > max_age {
        return Err(invalid());
    }

    let years_back = |years: u32| {
        years
            .checked_mul(12)
            .and_then(|months| reference.checked_sub_months(Months::new(months)))
    };
    let latest = years_back(min_age).ok_or_else(invalid)?;
    // The day after the (max_age + 1)th birthday would have been.
    let earliest = max_age
        .checked_add(1)
        .and_then(years_back)
        .and_then(|d| d.checked_add_signed(Duration::days(1)))
        .ok_or_else(invalid)?;

    let span = (latest - earliest).num_days();
    let offset = rng.next_i64_between(0, span);
    earliest
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(invalid)
}

/// Full age in years on `reference`.
pub fn age_on(birth_date: NaiveDate, reference: NaiveDate) -> u32 {
    reference.years_since(birth_date).unwrap_or(0)
}

pub struct PersonComposer {
    places: Arc<PlacesCatalog>,
    first_names: Arc<FirstNameCatalog>,
    last_names: Arc<LastNameCatalog>,
    addresses: Arc<AddressGenerator>,
    reference_date: NaiveDate,
}

impl PersonComposer {
    pub fn new(
        places: Arc<PlacesCatalog>,
        first_names: Arc<FirstNameCatalog>,
        last_names: Arc<LastNameCatalog>,
        addresses: Arc<AddressGenerator>,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            places,
            first_names,
            last_names,
            addresses,
            reference_date,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn generate_person(&self, rng: &mut FakerRng, options: &PersonOptions) -> FakerResult<ItalianPerson> {
        let birth_date = birth_date(rng, options.min_age, options.max_age, self.reference_date)?;

        // Province wins over region; with neither, a nationwide draw.
        let filter = match (&options.province, &options.region) {
            (Some(province), _) => CityFilter::default().province(province.clone()),
            (None, Some(region)) => CityFilter::default().region(region.clone()),
            (None, None) => CityFilter::default(),
        };
        let city = match self.places.city(rng, &filter)? {
            Some(city) => city,
            None => self.places.random_city(rng)?,
        };

        let first = self.first_names.first_name(
            rng,
            &FirstNameOptions {
                gender: options.gender,
                with_title: options.with_title,
            },
        )?;
        let last_name = self.last_names.last_name(
            rng,
            &LastNameOptions {
                region: options.region.clone(),
                province: options.province.clone(),
            },
        )?;

        let birth_place = BirthPlace::Italian { city };
        let fiscal_code = FiscalCode::compute(&FiscalCodeInput {
            last_name: &last_name,
            first_name: &first.name,
            gender: first.gender,
            birth_date,
            place_code: birth_place.cadastral_code(),
        })?;

        let contacts = Contacts::generate(rng, &first.name, &last_name);
        let address = self.addresses.complete_address(
            rng,
            &AddressOptions {
                region: options.region.clone(),
            },
        )?;

        let full_name = match &first.title {
            Some(title) => format!("{title} {} {last_name}", first.name),
            None => format!("{} {last_name}", first.name),
        };
        log::debug!(
            "person: {full_name} ({fiscal_code}), born in {}",
            birth_place.display_name()
        );

        Ok(ItalianPerson {
            full_name,
            title: first.title,
            first_name: first.name,
            last_name,
            gender: first.gender,
            birth_date,
            birth_place,
            fiscal_code,
            contacts,
            address,
        })
    }

    /// Resolve an explicit birthplace reference against the catalog.
    pub fn resolve_birth_place(&self, place: &BirthPlaceRef) -> FakerResult<BirthPlace> {
        match place {
            BirthPlaceRef::Belfiore(code) => self
                .places
                .city_by_belfiore(code)?
                .map(|city| BirthPlace::Italian { city })
                .ok_or_else(|| FakerError::UnknownBelfioreCode { code: code.clone() }),
            BirthPlaceRef::CityName(name) => self
                .places
                .city_by_name(name)?
                .map(|city| BirthPlace::Italian { city })
                .ok_or_else(|| FakerError::UnknownCity { name: name.clone() }),
            BirthPlaceRef::Country(name) => self
                .places
                .country(name)?
                .map(|country| BirthPlace::Foreign { country })
                .ok_or_else(|| FakerError::UnknownCountry { name: name.clone() }),
        }
    }

    /// Fiscal code from partially specified data.
    pub fn fiscal_code(&self, rng: &mut FakerRng, options: &FiscalCodeOptions) -> FakerResult<FiscalCode> {
        // Resolve first: an unknown place fails before any draw.
        let birth_place = match &options.birth_place {
            Some(place) => self.resolve_birth_place(place)?,
            None => BirthPlace::Italian {
                city: self.places.random_city(rng)?,
            },
        };

        let gender = options
            .gender
            .unwrap_or_else(|| first_name::random_gender(rng));
        let first_name = match &options.first_name {
            Some(name) => name.clone(),
            None => {
                self.first_names
                    .first_name(
                        rng,
                        &FirstNameOptions {
                            gender: Some(gender),
                            with_title: false,
                        },
                    )?
                    .name
            }
        };
        let last_name = match &options.last_name {
            Some(name) => name.clone(),
            None => self.last_names.last_name(rng, &LastNameOptions::default())?,
        };
        let birth_date = match options.birth_date {
            Some(date) => date,
            None => birth_date(rng, DEFAULT_MIN_AGE, DEFAULT_MAX_AGE, self.reference_date)?,
        };

        FiscalCode::compute(&FiscalCodeInput {
            last_name: &last_name,
            first_name: &first_name,
            gender,
            birth_date,
            place_code: birth_place.cadastral_code(),
        })
    }

    pub fn first_name(&self, rng: &mut FakerRng, options: &FirstNameOptions) -> FakerResult<String> {
        Ok(self.first_names.first_name(rng, options)?.display())
    }

    pub fn last_name(&self, rng: &mut FakerRng, options: &LastNameOptions) -> FakerResult<String> {
        self.last_names.last_name(rng, options)
    }

    /// `"[title] first last"` with a nationwide surname.
    pub fn full_name(&self, rng: &mut FakerRng, options: &FirstNameOptions) -> FakerResult<String> {
        let first = self.first_names.first_name(rng, options)?.display();
        let last = self.last_names.last_name(rng, &LastNameOptions::default())?;
        Ok(format!("{first} {last}"))
    }

    pub fn title(&self, rng: &mut FakerRng, gender: Option<Gender>) -> String {
        first_name::title(rng, gender).to_string()
    }

    pub fn birth_date(&self, rng: &mut FakerRng, min_age: u32, max_age: u32) -> FakerResult<NaiveDate> {
        birth_date(rng, min_age, max_age, self.reference_date)
    }

    pub fn phone(&self, rng: &mut FakerRng) -> String {
        contacts::mobile_phone(rng)
    }

    pub fn landline(&self, rng: &mut FakerRng) -> String {
        contacts::landline(rng)
    }

    /// E-mail for the given names, or for freshly drawn ones.
    pub fn email(
        &self,
        rng: &mut FakerRng,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> FakerResult<String> {
        let (first, last) = self.names_or_draw(rng, first_name, last_name)?;
        Ok(contacts::email(rng, &first, &last))
    }

    pub fn pec(
        &self,
        rng: &mut FakerRng,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> FakerResult<String> {
        let (first, last) = self.names_or_draw(rng, first_name, last_name)?;
        Ok(contacts::pec(rng, &first, &last))
    }

    fn names_or_draw(
        &self,
        rng: &mut FakerRng,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> FakerResult<(String, String)> {
        let first = match first_name {
            Some(name) => name.to_string(),
            None => self.first_names.first_name(rng, &FirstNameOptions::default())?.name,
        };
        let last = match last_name {
            Some(name) => name.to_string(),
            None => self.last_names.last_name(rng, &LastNameOptions::default())?,
        };
        Ok((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn birth_dates_respect_age_bounds() {
        let mut rng = FakerRng::seeded(31);
        for _ in 0..500 {
            let date = birth_date(&mut rng, 18, 25, reference()).unwrap();
            let age = age_on(date, reference());
            assert!((18..=25).contains(&age), "{date} gives age {age}");
        }
    }

    #[test]
    fn equal_bounds_pin_the_age() {
        let mut rng = FakerRng::seeded(32);
        for _ in 0..100 {
            let date = birth_date(&mut rng, 30, 30, reference()).unwrap();
            assert_eq!(age_on(date, reference()), 30, "{date}");
        }
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut rng = FakerRng::seeded(33);
        assert!(matches!(
            birth_date(&mut rng, 40, 30, reference()),
            Err(FakerError::InvalidAgeRange { min_age: 40, max_age: 30 })
        ));
    }

    #[test]
    fn birth_place_ref_serializes_tagged() {
        let json = serde_json::to_string(&BirthPlaceRef::Belfiore("H501".into())).unwrap();
        assert_eq!(json, r#"{"type":"belfiore","value":"H501"}"#);
    }
}
