//! itfaker-core: realistic, internally consistent Italian personal data.
//!
//! Leaves first:
//!   weighted   → proportional sampling
//!   places     → municipalities and countries
//!   first_name / last_name → ISTAT-weighted names, regional surnames
//!   fiscal_code → pure Codice Fiscale engine
//!   person     → composes all of the above
//!   faker      → seeded facade over everything

pub mod address;
mod cache;
pub mod config;
pub mod contacts;
pub mod dataset;
pub mod error;
pub mod faker;
pub mod first_name;
pub mod fiscal_code;
pub mod last_name;
pub mod person;
pub mod places;
pub mod rng;
pub mod types;
pub mod weighted;

pub use config::FakerConfig;
pub use error::{FakerError, FakerResult};
pub use faker::ItFaker;
pub use fiscal_code::{DecodedFiscalCode, FiscalCode, FiscalCodeInput};
pub use person::{BirthPlaceRef, FiscalCodeOptions, ItalianPerson, PersonOptions};
pub use types::{BirthPlace, City, Country, Gender};
