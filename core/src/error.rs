use thiserror::Error;

use crate::dataset::Dataset;

#[derive(Error, Debug)]
pub enum FakerError {
    #[error("Catalog has no entries")]
    EmptyCatalog,

    #[error("Catalog total weight is zero")]
    ZeroTotalWeight,

    #[error("Requested {requested} distinct entries but the catalog only has {available}")]
    CountExceedsCatalog { requested: usize, available: usize },

    #[error("Invalid age range: min {min_age} > max {max_age}")]
    InvalidAgeRange { min_age: u32, max_age: u32 },

    #[error("Base code must be exactly 15 characters, got {len}")]
    InvalidBaseLength { len: usize },

    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Invalid fiscal code '{code}': {reason}")]
    InvalidFiscalCode { code: String, reason: String },

    #[error("Invalid gender '{value}' (expected male or female)")]
    InvalidGender { value: String },

    #[error("Unknown Belfiore code '{code}'")]
    UnknownBelfioreCode { code: String },

    #[error("Unknown city '{name}'")]
    UnknownCity { name: String },

    #[error("Unknown country '{name}'")]
    UnknownCountry { name: String },

    #[error("Cannot load {dataset}: {message}")]
    DataLoad { dataset: Dataset, message: String },
}

pub type FakerResult<T> = Result<T, FakerError>;
