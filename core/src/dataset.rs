//! Reference data: dataset names, sources, and the raw on-disk records.
//!
//! RULE: Catalogs never touch the filesystem directly.
//! They ask a DataSource for a dataset's JSON text and parse it themselves,
//! so a failed read or parse never leaves a half-built catalog behind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::{
    error::{FakerError, FakerResult},
    types::{City, CodeName, Country, RegionalSurnames, WeightedTable},
};

/// Every reference dataset the generator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Cities,
    Countries,
    MaleFirstNames,
    FemaleFirstNames,
    LastNames,
    RegionalLastNames,
}

impl Dataset {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Cities => "cities.json",
            Self::Countries => "countries.json",
            Self::MaleFirstNames => "male_first_names.json",
            Self::FemaleFirstNames => "female_first_names.json",
            Self::LastNames => "last_names.json",
            Self::RegionalLastNames => "regional_last_names.json",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// The reference-data loader. Returns a dataset's raw JSON text.
pub trait DataSource: Send + Sync {
    fn read(&self, dataset: Dataset) -> FakerResult<String>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Reference data compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedData;

impl DataSource for EmbeddedData {
    fn read(&self, dataset: Dataset) -> FakerResult<String> {
        let text = match dataset {
            Dataset::Cities => include_str!("../data/cities.json"),
            Dataset::Countries => include_str!("../data/countries.json"),
            Dataset::MaleFirstNames => include_str!("../data/male_first_names.json"),
            Dataset::FemaleFirstNames => include_str!("../data/female_first_names.json"),
            Dataset::LastNames => include_str!("../data/last_names.json"),
            Dataset::RegionalLastNames => include_str!("../data/regional_last_names.json"),
        };
        Ok(text.to_string())
    }

    fn describe(&self) -> String {
        "embedded".into()
    }
}

/// Reference data read from a directory holding the same file names.
#[derive(Debug, Clone)]
pub struct DirectoryData {
    root: PathBuf,
}

impl DirectoryData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirectoryData {
    fn read(&self, dataset: Dataset) -> FakerResult<String> {
        let path = self.root.join(dataset.file_name());
        std::fs::read_to_string(&path).map_err(|e| FakerError::DataLoad {
            dataset,
            message: format!("cannot read {}: {e}", path.display()),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Read and parse one dataset.
pub(crate) fn load_json<T: serde::de::DeserializeOwned>(
    source: &dyn DataSource,
    dataset: Dataset,
) -> FakerResult<T> {
    let text = source.read(dataset)?;
    serde_json::from_str(&text).map_err(|e| FakerError::DataLoad {
        dataset,
        message: format!("invalid json from {}: {e}", source.describe()),
    })
}

// ── Raw records (Italian field names, as published) ───────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCodeName {
    pub codice: String,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCity {
    pub nome: String,
    pub codice: String,
    pub zona: RawCodeName,
    pub regione: RawCodeName,
    pub provincia: RawCodeName,
    pub sigla: String,
    pub codice_catastale: String,
    pub cap: Vec<String>,
    pub popolazione: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCountry {
    pub denominazione_continente: String,
    pub codice_istat: u32,
    pub denominazione_it: String,
    pub denominazione_en: String,
    pub codice_min: String,
    pub codice_at: String,
    pub codice_unsdm49: String,
    pub codice_iso3166_alpha2: String,
    pub codice_iso3166_alpha3: String,
}

impl From<RawCodeName> for CodeName {
    fn from(raw: RawCodeName) -> Self {
        Self {
            code: raw.codice,
            name: raw.nome,
        }
    }
}

impl From<RawCity> for City {
    fn from(raw: RawCity) -> Self {
        Self {
            name: raw.nome,
            code: raw.codice,
            zone: raw.zona.into(),
            region: raw.regione.into(),
            province: raw.provincia.into(),
            province_code: raw.sigla,
            belfiore_code: raw.codice_catastale.to_uppercase(),
            postal_codes: raw.cap,
            population: raw.popolazione,
        }
    }
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        Self {
            continent: raw.denominazione_continente,
            istat_code: raw.codice_istat,
            name_it: raw.denominazione_it,
            name_en: raw.denominazione_en,
            ministry_code: raw.codice_min,
            at_code: raw.codice_at.to_uppercase(),
            unsdm49_code: raw.codice_unsdm49,
            iso3166_alpha2: raw.codice_iso3166_alpha2,
            iso3166_alpha3: raw.codice_iso3166_alpha3,
        }
    }
}

pub(crate) fn load_cities(source: &dyn DataSource) -> FakerResult<Vec<City>> {
    let raw: Vec<RawCity> = load_json(source, Dataset::Cities)?;
    Ok(raw.into_iter().map(City::from).collect())
}

pub(crate) fn load_countries(source: &dyn DataSource) -> FakerResult<Vec<Country>> {
    let raw: Vec<RawCountry> = load_json(source, Dataset::Countries)?;
    Ok(raw.into_iter().map(Country::from).collect())
}

pub(crate) fn load_table(source: &dyn DataSource, dataset: Dataset) -> FakerResult<WeightedTable> {
    load_json(source, dataset)
}

pub(crate) fn load_regional_surnames(source: &dyn DataSource) -> FakerResult<Vec<RegionalSurnames>> {
    load_json(source, Dataset::RegionalLastNames)
}
