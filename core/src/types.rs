//! Shared domain types used across the entire generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FakerError;

/// Binary gender, as recorded by the ISTAT frequency tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FakerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(FakerError::InvalidGender {
                value: value.to_string(),
            }),
        }
    }
}

/// A (code, name) pair for regions, provinces, and statistical zones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

/// An Italian municipality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub name: String,
    /// ISTAT municipality code.
    pub code: String,
    pub zone: CodeName,
    pub region: CodeName,
    pub province: CodeName,
    /// Two-letter province abbreviation ("sigla"), e.g. `RM`.
    pub province_code: String,
    /// Cadastral code, the fiscal code's place segment.
    pub belfiore_code: String,
    pub postal_codes: Vec<String>,
    pub population: u64,
}

impl City {
    pub fn primary_postal_code(&self) -> Option<&str> {
        self.postal_codes.first().map(String::as_str)
    }
}

/// A foreign country, as listed by ISTAT.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub continent: String,
    pub istat_code: u32,
    pub name_it: String,
    pub name_en: String,
    pub ministry_code: String,
    /// Cadastral pseudo-code used in fiscal codes (`Z…`).
    pub at_code: String,
    pub unsdm49_code: String,
    pub iso3166_alpha2: String,
    pub iso3166_alpha3: String,
}

/// Surnames typical of one province.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionalSurnames {
    pub region: String,
    pub province: String,
    pub surnames: Vec<String>,
}

/// A value paired with its relative draw weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightedItem<T> {
    pub value: T,
    pub weight: u64,
}

impl<T> WeightedItem<T> {
    pub fn new(value: T, weight: u64) -> Self {
        Self { value, weight }
    }
}

/// A frequency table as shipped in the reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedTable {
    #[serde(rename = "type")]
    pub kind: String,
    pub last_update: String,
    pub items: Vec<WeightedItem<String>>,
}

/// Where a person was born. Decides the fiscal code's place segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BirthPlace {
    Italian { city: City },
    Foreign { country: Country },
}

impl BirthPlace {
    /// The 4-character code that goes into the fiscal code.
    pub fn cadastral_code(&self) -> &str {
        match self {
            Self::Italian { city } => &city.belfiore_code,
            Self::Foreign { country } => &country.at_code,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Italian { city } => &city.name,
            Self::Foreign { country } => &country.name_it,
        }
    }
}

/// Province summary returned by random province draws.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Province {
    pub name: String,
    pub code: String,
}

/// Flat birthplace description used for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BirthPlaceSummary {
    pub name: String,
    pub belfiore_code: String,
    pub province: String,
    pub region: String,
    pub province_code: String,
}

impl From<&City> for BirthPlaceSummary {
    fn from(city: &City) -> Self {
        Self {
            name: city.name.clone(),
            belfiore_code: city.belfiore_code.clone(),
            province: city.province.name.clone(),
            region: city.region.name.clone(),
            province_code: city.province_code.clone(),
        }
    }
}
