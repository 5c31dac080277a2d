//! Codice Fiscale computation.
//!
//! Layout (16 chars): SSS NNN YY M DD PPPP C
//!   SSS   surname consonants, then vowels, then X padding
//!   NNN   given name, same rule, except 4+ consonants → 1st, 3rd, 4th
//!   YY    last two digits of the birth year
//!   M     month letter (A B C D E H L M P R S T)
//!   DD    day of month, +40 for women
//!   PPPP  Belfiore code of the municipality, or Z-code of the country
//!   C     checksum letter over the first 15 chars
//!
//! Pure and deterministic: no RNG, no I/O. Homonym renumbering
//! ("omocodia") is not performed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{FakerError, FakerResult},
    types::Gender,
};

pub const FISCAL_CODE_LEN: usize = 16;
pub const BASE_CODE_LEN: usize = 15;

const MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

/// Checksum values for characters in odd (1-based) positions, indexed by
/// A–Z. Digits 0–9 share the values of A–J.
const ODD_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

const FEMALE_DAY_OFFSET: u32 = 40;

/// Inputs to the computation. Borrowed so the caller's exact values flow
/// through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct FiscalCodeInput<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    /// Belfiore code or foreign Z-code.
    pub place_code: &'a str,
}

/// A validated 16-character fiscal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalCode(String);

/// Fields recoverable from a fiscal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFiscalCode {
    pub surname_code: String,
    pub name_code: String,
    /// Two-digit year; the century is not encoded.
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub gender: Gender,
    pub place_code: String,
}

impl FiscalCode {
    /// Compute the code for `input`.
    pub fn compute(input: &FiscalCodeInput<'_>) -> FakerResult<Self> {
        let base = format!(
            "{}{}{}{}",
            surname_segment(input.last_name),
            name_segment(input.first_name),
            date_segment(input.birth_date, input.gender),
            input.place_code.trim().to_uppercase(),
        );
        let check = control_char(&base)?;
        let mut code = base;
        code.push(check);
        Ok(Self(code))
    }

    /// Validate format and checksum of an existing code.
    ///
    /// The last three characters of the place block may be letters as well
    /// as digits, so codes renumbered for homonyms still parse; `compute`
    /// itself only ever emits the digits of a real Belfiore or Z-code.
    pub fn parse(code: &str) -> FakerResult<Self> {
        let code = code.trim().to_uppercase();
        let invalid = |reason: &str| FakerError::InvalidFiscalCode {
            code: code.clone(),
            reason: reason.to_string(),
        };

        if code.chars().count() != FISCAL_CODE_LEN {
            return Err(invalid("must be 16 characters"));
        }
        if !has_canonical_shape(&code) {
            return Err(invalid("expected 6 letters, 2 digits, letter, 2 digits, letter, 3 alphanumerics, letter"));
        }
        let expected = control_char(&code[..BASE_CODE_LEN])?;
        if code.ends_with(expected) {
            Ok(Self(code))
        } else {
            Err(invalid("checksum mismatch"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn base(&self) -> &str {
        &self.0[..BASE_CODE_LEN]
    }

    pub fn check_char(&self) -> char {
        self.0.as_bytes()[BASE_CODE_LEN] as char
    }

    pub fn decode(&self) -> FakerResult<DecodedFiscalCode> {
        let code = &self.0;
        let number = |range: std::ops::Range<usize>| {
            code[range.clone()]
                .parse::<u32>()
                .map_err(|_| FakerError::InvalidFiscalCode {
                    code: code.clone(),
                    reason: format!("non-numeric segment '{}'", &code[range]),
                })
        };

        let year = number(6..8)?;
        let month_char = code.as_bytes()[8] as char;
        let month = MONTH_CODES
            .iter()
            .position(|&m| m == month_char)
            .map(|i| i as u32 + 1)
            .ok_or_else(|| FakerError::InvalidFiscalCode {
                code: code.clone(),
                reason: format!("unknown month letter '{month_char}'"),
            })?;
        let raw_day = number(9..11)?;
        let (gender, day) = if raw_day > FEMALE_DAY_OFFSET {
            (Gender::Female, raw_day - FEMALE_DAY_OFFSET)
        } else {
            (Gender::Male, raw_day)
        };

        Ok(DecodedFiscalCode {
            surname_code: code[0..3].to_string(),
            name_code: code[3..6].to_string(),
            year,
            month,
            day,
            gender,
            place_code: code[11..15].to_string(),
        })
    }
}

impl fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FiscalCode {
    type Error = FakerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FiscalCode> for String {
    fn from(code: FiscalCode) -> Self {
        code.0
    }
}

impl AsRef<str> for FiscalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `[A-Z]{6}\d{2}[A-Z]\d{2}[A-Z][A-Z0-9]{3}[A-Z]`; the place block
/// starts with a letter and may carry digits.
fn has_canonical_shape(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == FISCAL_CODE_LEN
        && bytes[0..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..8].iter().all(u8::is_ascii_digit)
        && bytes[8].is_ascii_uppercase()
        && bytes[9..11].iter().all(u8::is_ascii_digit)
        && bytes[11].is_ascii_uppercase()
        && bytes[12..15].iter().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        && bytes[15].is_ascii_uppercase()
}

/// Fold accented vowels to their plain form.
fn fold_accent(c: char) -> char {
    match c {
        'À' | 'Á' | 'Â' | 'Ä' => 'A',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        other => other,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Uppercased consonants and vowels of `name`, in order. Anything that is
/// not an ASCII letter after accent folding is dropped.
fn split_letters(name: &str) -> (Vec<char>, Vec<char>) {
    let letters = name
        .to_uppercase()
        .chars()
        .map(fold_accent)
        .filter(char::is_ascii_uppercase)
        .collect::<Vec<_>>();
    letters.into_iter().partition(|&c| !is_vowel(c))
}

fn pad_segment(consonants: &[char], vowels: &[char]) -> String {
    consonants
        .iter()
        .chain(vowels)
        .copied()
        .chain(std::iter::repeat('X'))
        .take(3)
        .collect()
}

pub fn surname_segment(last_name: &str) -> String {
    let (consonants, vowels) = split_letters(last_name);
    pad_segment(&consonants, &vowels)
}

pub fn name_segment(first_name: &str) -> String {
    let (consonants, vowels) = split_letters(first_name);
    if consonants.len() >= 4 {
        return [consonants[0], consonants[2], consonants[3]].iter().collect();
    }
    pad_segment(&consonants, &vowels)
}

pub fn date_segment(birth_date: NaiveDate, gender: Gender) -> String {
    let year = birth_date.year().rem_euclid(100);
    let month = MONTH_CODES[birth_date.month0() as usize];
    let day = match gender {
        Gender::Male => birth_date.day(),
        Gender::Female => birth_date.day() + FEMALE_DAY_OFFSET,
    };
    format!("{year:02}{month}{day:02}")
}

fn odd_value(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(ODD_VALUES[(c as u8 - b'A') as usize]),
        '0'..='9' => Some(ODD_VALUES[(c as u8 - b'0') as usize]),
        _ => None,
    }
}

fn even_value(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some((c as u8 - b'A') as u32),
        '0'..='9' => Some((c as u8 - b'0') as u32),
        _ => None,
    }
}

/// Checksum letter for a 15-character base code.
pub fn control_char(base: &str) -> FakerResult<char> {
    let len = base.chars().count();
    if len != BASE_CODE_LEN {
        return Err(FakerError::InvalidBaseLength { len });
    }

    let mut sum = 0u32;
    for (i, ch) in base.chars().enumerate() {
        let position = i + 1;
        let value = if position % 2 == 1 { odd_value(ch) } else { even_value(ch) };
        sum += value.ok_or(FakerError::InvalidCharacter { ch, position })?;
    }
    Ok((b'A' + (sum % 26) as u8) as char)
}
