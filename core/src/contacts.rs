//! Templated contact details: phone numbers, e-mail, PEC.

use serde::{Deserialize, Serialize};

use crate::rng::FakerRng;

const MOBILE_PREFIXES: &[&str] = &[
    "320", "328", "338", "348", "350", "360", "368", "388", "389", "391", "392",
];
const LANDLINE_PREFIXES: &[&str] = &["02", "06", "010", "011", "045", "051"];
const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.it", "libero.it", "hotmail.it", "outlook.it"];
const EMAIL_SEPARATORS: &[&str] = &[".", "_", ""];
const PEC_DOMAINS: &[&str] = &["pec.it", "legalmail.it", "pecmail.it"];

const SUBSCRIBER_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub phone: String,
    pub email: String,
    pub pec: String,
}

impl Contacts {
    /// Mobile number, e-mail and PEC derived from the given names.
    pub fn generate(rng: &mut FakerRng, first_name: &str, last_name: &str) -> Self {
        Self {
            phone: mobile_phone(rng),
            email: email(rng, first_name, last_name),
            pec: pec(rng, first_name, last_name),
        }
    }
}

/// `3xx` mobile prefix followed by seven digits.
pub fn mobile_phone(rng: &mut FakerRng) -> String {
    let prefix = rng.pick(MOBILE_PREFIXES);
    format!("{prefix}{}", rng.digits(SUBSCRIBER_DIGITS))
}

/// Area code of a large city followed by seven digits.
pub fn landline(rng: &mut FakerRng) -> String {
    let prefix = rng.pick(LANDLINE_PREFIXES);
    format!("{prefix}{}", rng.digits(SUBSCRIBER_DIGITS))
}

fn mailbox_part(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', ".")
}

pub fn email(rng: &mut FakerRng, first_name: &str, last_name: &str) -> String {
    let domain = rng.pick(EMAIL_DOMAINS);
    let separator = rng.pick(EMAIL_SEPARATORS);
    format!(
        "{}{separator}{}@{domain}",
        mailbox_part(first_name),
        mailbox_part(last_name)
    )
}

/// Certified e-mail address, always `first.last@provider`.
pub fn pec(rng: &mut FakerRng, first_name: &str, last_name: &str) -> String {
    let domain = rng.pick(PEC_DOMAINS);
    format!("{}.{}@{domain}", mailbox_part(first_name), mailbox_part(last_name))
}
