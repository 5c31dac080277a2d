//! itfaker: headless generator for Italian synthetic identities.
//!
//! Usage:
//!   itfaker person --seed 12345 --count 3 --region Lombardia
//!   itfaker fiscal-code --first-name Mario --last-name Rossi --gender m \
//!       --birth-date 1990-01-01 --city Roma
//!   itfaker validate RSSMRA90A01H501W
//!   itfaker city --region Sardegna --count 2 --config itfaker.json
//!
//! Every command prints one JSON value per line.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use itfaker_core::{
    address::AddressOptions,
    first_name::FirstNameOptions,
    last_name::LastNameOptions,
    places::CityFilter,
    BirthPlaceRef, FakerConfig, FiscalCode, FiscalCodeOptions, Gender, ItFaker, PersonOptions,
};
use serde::Serialize;
use std::env;

const COMMANDS: &str =
    "first-name | last-name | full-name | person | fiscal-code | validate | address | city | country";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("person");

    let mut config = match flag(&args, "--config") {
        Some(path) => FakerConfig::load(path)?,
        None => FakerConfig::default(),
    };
    if let Some(seed) = flag(&args, "--seed") {
        config.seed = Some(seed.parse().with_context(|| format!("invalid --seed '{seed}'"))?);
    }
    if let Some(dir) = flag(&args, "--data-dir") {
        config.data_dir = Some(dir.to_string());
    }
    config.validate()?;

    let count = parse_arg(&args, "--count", 1usize);
    let gender = flag(&args, "--gender").map(str::parse::<Gender>).transpose()?;
    let region = flag(&args, "--region").map(str::to_string);
    let province = flag(&args, "--province").map(str::to_string);
    let with_title = args.iter().any(|a| a == "--title");

    let mut faker = ItFaker::build(&config)?;
    log::info!("itfaker {command}: seed {}", faker.seed());

    match command {
        "first-name" => {
            let options = FirstNameOptions { gender, with_title };
            repeat(count, || faker.first_name(&options).map_err(Into::into))
        }
        "last-name" => {
            let options = LastNameOptions { region, province };
            repeat(count, || faker.last_name(&options).map_err(Into::into))
        }
        "full-name" => {
            let options = FirstNameOptions { gender, with_title };
            repeat(count, || faker.full_name(&options).map_err(Into::into))
        }
        "person" => {
            let options = PersonOptions {
                gender,
                min_age: parse_arg(&args, "--min-age", config.default_min_age),
                max_age: parse_arg(&args, "--max-age", config.default_max_age),
                with_title,
                region,
                province,
            };
            repeat(count, || faker.generate_person(&options).map_err(Into::into))
        }
        "fiscal-code" => {
            let options = FiscalCodeOptions {
                first_name: flag(&args, "--first-name").map(str::to_string),
                last_name: flag(&args, "--last-name").map(str::to_string),
                gender,
                birth_date: flag(&args, "--birth-date").map(parse_date).transpose()?,
                birth_place: birth_place_ref(&args),
            };
            repeat(count, || faker.fiscal_code(&options).map_err(Into::into))
        }
        "validate" => {
            let Some(code) = args.get(2) else {
                bail!("usage: itfaker validate <FISCAL_CODE>");
            };
            let code = FiscalCode::parse(code)?;
            emit(&code.decode()?)
        }
        "address" => {
            let options = AddressOptions { region };
            repeat(count, || faker.complete_address(&options).map_err(Into::into))
        }
        "city" => {
            let filter = CityFilter {
                region,
                province,
                belfiore_code: flag(&args, "--belfiore").map(str::to_string),
                city_name: flag(&args, "--city").map(str::to_string),
            };
            repeat(count, || faker.city(&filter).map_err(Into::into))
        }
        "country" => match flag(&args, "--name") {
            Some(name) => emit(&faker.country(name)?),
            None => repeat(count, || faker.random_country().map_err(Into::into)),
        },
        other => bail!("unknown command '{other}' (expected {COMMANDS})"),
    }
}

fn repeat<T, F>(count: usize, mut draw: F) -> Result<()>
where
    T: Serialize,
    F: FnMut() -> Result<T>,
{
    for _ in 0..count {
        emit(&draw()?)?;
    }
    Ok(())
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// `--belfiore`, then `--city`, then `--country`; first one present wins.
fn birth_place_ref(args: &[String]) -> Option<BirthPlaceRef> {
    if let Some(code) = flag(args, "--belfiore") {
        return Some(BirthPlaceRef::Belfiore(code.to_string()));
    }
    if let Some(name) = flag(args, "--city") {
        return Some(BirthPlaceRef::CityName(name.to_string()));
    }
    flag(args, "--country").map(|name| BirthPlaceRef::Country(name.to_string()))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}' (expected YYYY-MM-DD)"))
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == name).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
