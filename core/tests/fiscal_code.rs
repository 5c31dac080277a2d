//! Fiscal code engine: known codes, layout, checksum, and errors.

use chrono::NaiveDate;
use itfaker_core::{
    fiscal_code::{control_char, name_segment, FiscalCode, FiscalCodeInput},
    FakerError, Gender,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn compute(last: &str, first: &str, gender: Gender, birth: NaiveDate, place: &str) -> String {
    FiscalCode::compute(&FiscalCodeInput {
        last_name: last,
        first_name: first,
        gender,
        birth_date: birth,
        place_code: place,
    })
    .unwrap()
    .to_string()
}

/// `[A-Z]{6}\d{2}[A-Z]\d{2}[A-Z]\d{3}[A-Z]`
fn matches_layout(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 16
        && b[0..6].iter().all(u8::is_ascii_uppercase)
        && b[6..8].iter().all(u8::is_ascii_digit)
        && b[8].is_ascii_uppercase()
        && b[9..11].iter().all(u8::is_ascii_digit)
        && b[11].is_ascii_uppercase()
        && b[12..15].iter().all(u8::is_ascii_digit)
        && b[15].is_ascii_uppercase()
}

#[test]
fn mario_rossi_born_in_rome() {
    let code = compute("Rossi", "Mario", Gender::Male, date(1990, 1, 1), "H501");
    assert_eq!(code, "RSSMRA90A01H501W");
}

#[test]
fn female_variant_adds_forty_to_the_day() {
    let code = compute("Rossi", "Maria", Gender::Female, date(1990, 1, 1), "H501");
    assert_eq!(code, "RSSMRA90A41H501A");
}

#[test]
fn reference_codes() {
    let cases = [
        ("Bianchi", "Giuseppe", Gender::Male, date(1985, 8, 15), "F205", "BNCGPP85M15F205R"),
        ("Verdi", "Giovanna", Gender::Female, date(1972, 5, 15), "Z110", "VRDGNN72E55Z110Q"),
        ("De Luca", "Anna Maria", Gender::Female, date(2000, 12, 31), "B354", "DLCNMR00T71B354L"),
        ("Ferrari", "Luca", Gender::Male, date(2003, 2, 28), "Z404", "FRRLCU03B28Z404M"),
        ("D'Angelo", "Niccolò", Gender::Male, date(1995, 4, 10), "G273", "DNGNCL95D10G273U"),
    ];
    for (last, first, gender, birth, place, expected) in cases {
        let code = compute(last, first, gender, birth, place);
        assert_eq!(code, expected, "{first} {last} {birth} {place}");
    }
}

#[test]
fn output_is_uppercase_whatever_the_input_case() {
    let lower = compute("rossi", "mario", Gender::Male, date(1990, 1, 1), "h501");
    let upper = compute("ROSSI", "MARIO", Gender::Male, date(1990, 1, 1), "H501");
    assert_eq!(lower, upper);
    assert!(matches_layout(&lower), "{lower}");
}

#[test]
fn same_inputs_same_code() {
    let a = compute("Esposito", "Francesca", Gender::Female, date(1968, 11, 3), "F839");
    let b = compute("Esposito", "Francesca", Gender::Female, date(1968, 11, 3), "F839");
    assert_eq!(a, b);
}

#[test]
fn female_day_is_male_day_plus_forty() {
    for day in [1, 9, 15, 28, 31] {
        let birth = date(1999, 3, day);
        let male = compute("Conti", "Andrea", Gender::Male, birth, "A794");
        let female = compute("Conti", "Andrea", Gender::Female, birth, "A794");
        let male_day: u32 = male[9..11].parse().unwrap();
        let female_day: u32 = female[9..11].parse().unwrap();
        assert_eq!(female_day, male_day + 40, "{male} vs {female}");
    }
}

#[test]
fn checksum_matches_recomputation() {
    for code in ["RSSMRA90A01H501W", "BNCGPP85M15F205R", "VRDGNN72E55Z110Q"] {
        let check = control_char(&code[..15]).unwrap();
        assert_eq!(check, code.chars().last().unwrap(), "{code}");
    }
}

#[test]
fn control_char_rejects_wrong_length() {
    for base in ["", "RSSMRA90A01H50", "RSSMRA90A01H501W"] {
        match control_char(base) {
            Err(FakerError::InvalidBaseLength { len }) => assert_eq!(len, base.len()),
            other => panic!("expected InvalidBaseLength for '{base}', got {other:?}"),
        }
    }
}

#[test]
fn control_char_rejects_symbols() {
    match control_char("RSSMRA90A01H50#") {
        Err(FakerError::InvalidCharacter { ch, position }) => {
            assert_eq!(ch, '#');
            assert_eq!(position, 15);
        }
        other => panic!("expected InvalidCharacter, got {other:?}"),
    }
}

#[test]
fn malformed_place_code_is_rejected() {
    let result = FiscalCode::compute(&FiscalCodeInput {
        last_name: "Rossi",
        first_name: "Mario",
        gender: Gender::Male,
        birth_date: date(1990, 1, 1),
        place_code: "H5",
    });
    assert!(
        matches!(result, Err(FakerError::InvalidBaseLength { len: 13 })),
        "got {result:?}"
    );
}

#[test]
fn decode_recovers_date_gender_and_place() {
    let code = FiscalCode::parse("RSSMRA90A41H501A").unwrap();
    let decoded = code.decode().unwrap();
    assert_eq!(decoded.surname_code, "RSS");
    assert_eq!(decoded.name_code, "MRA");
    assert_eq!(decoded.year, 90);
    assert_eq!(decoded.month, 1);
    assert_eq!(decoded.day, 1);
    assert_eq!(decoded.gender, Gender::Female);
    assert_eq!(decoded.place_code, "H501");
}

#[test]
fn parse_rejects_malformed_codes() {
    for bad in [
        "RSSMRA90A01H501",   // short
        "RSSMRA9XA01H501W",  // letter in the year
        "RSSMRA90A01H501A",  // wrong checksum
        "RSSMRA90A01H501WX", // long
    ] {
        assert!(
            matches!(FiscalCode::parse(bad), Err(FakerError::InvalidFiscalCode { .. })),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn fiscal_code_serializes_as_plain_string() {
    let code = FiscalCode::parse("RSSMRA90A01H501W").unwrap();
    let json = serde_json::to_string(&code).unwrap();
    assert_eq!(json, "\"RSSMRA90A01H501W\"");
    let back: FiscalCode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, code);
    assert!(serde_json::from_str::<FiscalCode>("\"RSSMRA90A01H501X\"").is_err());
}

#[test]
fn vowel_only_name_pads_with_x() {
    assert_eq!(name_segment("Ia"), "IAX");
}

#[test]
fn parse_accepts_letters_in_the_place_digits() {
    let renumbered = compute("Rossi", "Mario", Gender::Male, date(1990, 1, 1), "H5LM");
    assert!(!matches_layout(&renumbered), "{renumbered}");
    assert!(FiscalCode::parse(&renumbered).is_ok(), "{renumbered}");

    let digit_led = compute("Rossi", "Mario", Gender::Male, date(1990, 1, 1), "1501");
    assert!(
        matches!(FiscalCode::parse(&digit_led), Err(FakerError::InvalidFiscalCode { .. })),
        "{digit_led} should be rejected"
    );
}
