//! Gender-aware first name generation from ISTAT frequency tables.
//!
//! Two weighted catalogs (male, female). When the caller leaves gender
//! open it is picked uniformly, and the gender actually used is returned
//! alongside the name so derived fields (the fiscal code's day segment)
//! stay consistent.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    cache::LoadOnce,
    dataset::{self, DataSource, Dataset, EmbeddedData},
    error::FakerResult,
    rng::FakerRng,
    types::{Gender, WeightedTable},
    weighted::WeightedSelector,
};

const MALE_TITLES: &[&str] = &["Dott.", "Ing.", "Avv.", "Prof.", "Arch.", "Rag."];
const FEMALE_TITLES: &[&str] = &["Dott.ssa", "Ing.", "Avv.", "Prof.ssa", "Arch.", "Rag."];
const NEUTRAL_TITLES: &[&str] = &["Ing.", "Avv.", "Arch.", "Rag.", "Geom."];

/// Title-case every space-delimited word: `"ANNA MARIA"` → `"Anna Maria"`.
pub fn format_italian_name(name: &str) -> String {
    name.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uniform coin flip between the two genders.
pub fn random_gender(rng: &mut FakerRng) -> Gender {
    *rng.pick(&Gender::ALL)
}

/// Professional title for `gender`; `None` draws from the neutral list.
pub fn title(rng: &mut FakerRng, gender: Option<Gender>) -> &'static str {
    let titles = match gender {
        Some(Gender::Male) => MALE_TITLES,
        Some(Gender::Female) => FEMALE_TITLES,
        None => NEUTRAL_TITLES,
    };
    *rng.pick(titles)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstNameOptions {
    pub gender: Option<Gender>,
    /// Prefix the name with a professional title.
    pub with_title: bool,
}

/// A drawn first name and the gender it was drawn for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstNameDraw {
    pub name: String,
    pub gender: Gender,
    pub title: Option<String>,
}

impl FirstNameDraw {
    /// `"Dott. Mario"` when titled, otherwise just the name.
    pub fn display(&self) -> String {
        match &self.title {
            Some(title) => format!("{title} {}", self.name),
            None => self.name.clone(),
        }
    }
}

struct FirstNameData {
    male: WeightedSelector<String>,
    female: WeightedSelector<String>,
}

pub struct FirstNameCatalog {
    source: Arc<dyn DataSource>,
    data: LoadOnce<FirstNameData>,
}

impl FirstNameCatalog {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            data: LoadOnce::new("first_name"),
        }
    }

    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedData))
    }

    fn data(&self) -> FakerResult<Arc<FirstNameData>> {
        self.data.get_or_load(|| {
            let male: WeightedTable = dataset::load_table(self.source.as_ref(), Dataset::MaleFirstNames)?;
            let female: WeightedTable =
                dataset::load_table(self.source.as_ref(), Dataset::FemaleFirstNames)?;
            Ok(FirstNameData {
                male: WeightedSelector::new(male.items)?,
                female: WeightedSelector::new(female.items)?,
            })
        })
    }

    pub fn preload(&self) -> FakerResult<()> {
        self.data().map(|_| ())
    }

    pub fn clear_cache(&self) {
        self.data.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    /// Draw a first name, reporting the gender used.
    pub fn first_name(&self, rng: &mut FakerRng, options: &FirstNameOptions) -> FakerResult<FirstNameDraw> {
        let data = self.data()?;
        let gender = options.gender.unwrap_or_else(|| random_gender(rng));
        let raw = match gender {
            Gender::Male => data.male.select(rng),
            Gender::Female => data.female.select(rng),
        };
        let title = options
            .with_title
            .then(|| title(rng, Some(gender)).to_string());

        Ok(FirstNameDraw {
            name: format_italian_name(raw),
            gender,
            title,
        })
    }

    /// Every distinct name for `gender`, formatted.
    pub fn names(&self, gender: Gender) -> FakerResult<Vec<String>> {
        let data = self.data()?;
        let selector = match gender {
            Gender::Male => &data.male,
            Gender::Female => &data.female,
        };
        Ok(selector.values().map(|n| format_italian_name(n)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_every_word() {
        assert_eq!(format_italian_name("ANNA MARIA"), "Anna Maria");
        assert_eq!(format_italian_name("pier luigi"), "Pier Luigi");
        assert_eq!(format_italian_name("De LUCA"), "De Luca");
        assert_eq!(format_italian_name("d'angelo"), "D'angelo");
    }

    #[test]
    fn titles_follow_gender() {
        let mut rng = FakerRng::seeded(5);
        for _ in 0..50 {
            assert!(FEMALE_TITLES.contains(&title(&mut rng, Some(Gender::Female))));
            assert!(MALE_TITLES.contains(&title(&mut rng, Some(Gender::Male))));
            assert!(NEUTRAL_TITLES.contains(&title(&mut rng, None)));
        }
    }

    #[test]
    fn requested_gender_is_reported() {
        let catalog = FirstNameCatalog::embedded();
        let mut rng = FakerRng::seeded(11);
        let female = FirstNameOptions {
            gender: Some(Gender::Female),
            with_title: false,
        };
        for _ in 0..20 {
            let draw = catalog.first_name(&mut rng, &female).unwrap();
            assert_eq!(draw.gender, Gender::Female);
            assert!(draw.title.is_none());
        }
    }

    #[test]
    fn titled_draw_displays_prefix() {
        let catalog = FirstNameCatalog::embedded();
        let mut rng = FakerRng::seeded(12);
        let options = FirstNameOptions {
            gender: Some(Gender::Male),
            with_title: true,
        };
        let draw = catalog.first_name(&mut rng, &options).unwrap();
        let title = draw.title.clone().unwrap();
        assert!(MALE_TITLES.contains(&title.as_str()));
        assert_eq!(draw.display(), format!("{title} {}", draw.name));
    }
}
