//! Geographic catalog: Italian municipalities and foreign countries.
//!
//! Cities are drawn proportionally to population. Lookups by Belfiore
//! code, city name, region, province, and country name are
//! case-insensitive. Reference data loads on first use and stays cached
//! until `clear_cache()`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    cache::LoadOnce,
    dataset::{self, DataSource, EmbeddedData},
    error::{FakerError, FakerResult},
    rng::FakerRng,
    types::{BirthPlaceSummary, City, Country, Province, WeightedItem},
    weighted::WeightedSelector,
};

/// Narrowing options for `PlacesCatalog::city`.
///
/// `belfiore_code` and `city_name` are exact matches and win over the
/// geographic filters; `province` wins over `region`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityFilter {
    pub region: Option<String>,
    pub province: Option<String>,
    pub belfiore_code: Option<String>,
    pub city_name: Option<String>,
}

impl CityFilter {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn belfiore_code(mut self, code: impl Into<String>) -> Self {
        self.belfiore_code = Some(code.into());
        self
    }

    pub fn city_name(mut self, name: impl Into<String>) -> Self {
        self.city_name = Some(name.into());
        self
    }
}

struct PlacesData {
    cities: Vec<City>,
    selector: WeightedSelector<usize>,
    by_belfiore: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_region: HashMap<String, WeightedSelector<usize>>,
    by_province: HashMap<String, WeightedSelector<usize>>,
    countries: Vec<Country>,
    country_by_name: HashMap<String, usize>,
}

/// Population weight of a city. Unpopulated entries keep weight 1 so
/// they remain reachable.
fn population_weight(city: &City) -> u64 {
    city.population.max(1)
}

fn key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl PlacesData {
    fn build(cities: Vec<City>, countries: Vec<Country>) -> FakerResult<Self> {
        let selector = WeightedSelector::new(
            cities
                .iter()
                .enumerate()
                .map(|(i, c)| WeightedItem::new(i, population_weight(c)))
                .collect(),
        )?;

        let mut by_belfiore = HashMap::with_capacity(cities.len());
        let mut by_name = HashMap::with_capacity(cities.len());
        let mut region_members: HashMap<String, Vec<WeightedItem<usize>>> = HashMap::new();
        let mut province_members: HashMap<String, Vec<WeightedItem<usize>>> = HashMap::new();

        for (i, city) in cities.iter().enumerate() {
            by_belfiore.entry(city.belfiore_code.to_uppercase()).or_insert(i);
            // Homonymous municipalities exist; the first in catalog order wins.
            by_name.entry(key(&city.name)).or_insert(i);
            let weight = population_weight(city);
            region_members
                .entry(key(&city.region.name))
                .or_default()
                .push(WeightedItem::new(i, weight));
            province_members
                .entry(key(&city.province.name))
                .or_default()
                .push(WeightedItem::new(i, weight));
        }

        let by_region = region_members
            .into_iter()
            .map(|(k, items)| Ok((k, WeightedSelector::new(items)?)))
            .collect::<FakerResult<HashMap<_, _>>>()?;
        let by_province = province_members
            .into_iter()
            .map(|(k, items)| Ok((k, WeightedSelector::new(items)?)))
            .collect::<FakerResult<HashMap<_, _>>>()?;

        let mut country_by_name = HashMap::with_capacity(countries.len() * 2);
        for (i, country) in countries.iter().enumerate() {
            country_by_name.entry(key(&country.name_it)).or_insert(i);
            country_by_name.entry(key(&country.name_en)).or_insert(i);
        }

        Ok(Self {
            cities,
            selector,
            by_belfiore,
            by_name,
            by_region,
            by_province,
            countries,
            country_by_name,
        })
    }

    fn draw(&self, rng: &mut FakerRng) -> &City {
        &self.cities[*self.selector.select(rng)]
    }
}

pub struct PlacesCatalog {
    source: Arc<dyn DataSource>,
    data: LoadOnce<PlacesData>,
}

impl PlacesCatalog {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            data: LoadOnce::new("places"),
        }
    }

    /// Catalog over the reference data compiled into the library.
    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedData))
    }

    fn data(&self) -> FakerResult<Arc<PlacesData>> {
        self.data.get_or_load(|| {
            let cities = dataset::load_cities(self.source.as_ref())?;
            let countries = dataset::load_countries(self.source.as_ref())?;
            log::debug!(
                "places: {} cities, {} countries from {}",
                cities.len(),
                countries.len(),
                self.source.describe()
            );
            PlacesData::build(cities, countries)
        })
    }

    /// Force the reference data load now rather than on first draw.
    pub fn preload(&self) -> FakerResult<()> {
        self.data().map(|_| ())
    }

    /// Drop the cached reference data. Not safe against in-flight reads
    /// on the same instance; callers serialize teardown.
    pub fn clear_cache(&self) {
        self.data.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    /// Number of municipalities in the catalog.
    pub fn len(&self) -> FakerResult<usize> {
        Ok(self.data()?.cities.len())
    }

    pub fn is_empty(&self) -> FakerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// One city, drawn proportionally to population.
    pub fn random_city(&self, rng: &mut FakerRng) -> FakerResult<City> {
        Ok(self.data()?.draw(rng).clone())
    }

    /// `count` distinct cities, each drawn proportionally to population.
    pub fn random_cities(&self, rng: &mut FakerRng, count: usize) -> FakerResult<Vec<City>> {
        let data = self.data()?;
        if count > data.cities.len() {
            return Err(FakerError::CountExceedsCatalog {
                requested: count,
                available: data.cities.len(),
            });
        }

        let mut seen = HashSet::with_capacity(count);
        let mut picked = Vec::with_capacity(count);
        while picked.len() < count {
            let index = *data.selector.select(rng);
            if seen.insert(index) {
                picked.push(data.cities[index].clone());
            }
        }
        Ok(picked)
    }

    /// Filtered city lookup.
    ///
    /// Exact filters return `None` when nothing matches. Geographic filters
    /// that match nothing fall through to the next one, and finally to a
    /// draw over the whole catalog.
    pub fn city(&self, rng: &mut FakerRng, filter: &CityFilter) -> FakerResult<Option<City>> {
        let data = self.data()?;

        if let Some(code) = &filter.belfiore_code {
            return Ok(data
                .by_belfiore
                .get(&code.trim().to_uppercase())
                .map(|&i| data.cities[i].clone()));
        }
        if let Some(name) = &filter.city_name {
            return Ok(data.by_name.get(&key(name)).map(|&i| data.cities[i].clone()));
        }

        if let Some(province) = &filter.province {
            if let Some(selector) = data.by_province.get(&key(province)) {
                return Ok(Some(data.cities[*selector.select(rng)].clone()));
            }
            log::debug!("places: no cities in province '{province}', widening");
        }
        if let Some(region) = &filter.region {
            if let Some(selector) = data.by_region.get(&key(region)) {
                return Ok(Some(data.cities[*selector.select(rng)].clone()));
            }
            log::debug!("places: no cities in region '{region}', widening");
        }

        Ok(Some(data.draw(rng).clone()))
    }

    pub fn city_by_belfiore(&self, code: &str) -> FakerResult<Option<City>> {
        let data = self.data()?;
        Ok(data
            .by_belfiore
            .get(&code.trim().to_uppercase())
            .map(|&i| data.cities[i].clone()))
    }

    pub fn city_by_name(&self, name: &str) -> FakerResult<Option<City>> {
        let data = self.data()?;
        Ok(data.by_name.get(&key(name)).map(|&i| data.cities[i].clone()))
    }

    /// The `n` most populated cities, largest first.
    pub fn most_populated(&self, n: usize) -> FakerResult<Vec<City>> {
        let data = self.data()?;
        let mut ranked: Vec<&City> = data.cities.iter().collect();
        ranked.sort_by(|a, b| b.population.cmp(&a.population));
        Ok(ranked.into_iter().take(n).cloned().collect())
    }

    /// Country by Italian or English name, case-insensitive.
    pub fn country(&self, name: &str) -> FakerResult<Option<Country>> {
        let data = self.data()?;
        Ok(data
            .country_by_name
            .get(&key(name))
            .map(|&i| data.countries[i].clone()))
    }

    pub fn random_country(&self, rng: &mut FakerRng) -> FakerResult<Country> {
        let data = self.data()?;
        if data.countries.is_empty() {
            return Err(FakerError::EmptyCatalog);
        }
        Ok(rng.pick(&data.countries).clone())
    }

    /// Province of a population-weighted city.
    pub fn province(&self, rng: &mut FakerRng) -> FakerResult<Province> {
        let city = self.random_city(rng)?;
        Ok(Province {
            name: city.province.name,
            code: city.province_code,
        })
    }

    /// Region name of a population-weighted city.
    pub fn region(&self, rng: &mut FakerRng) -> FakerResult<String> {
        Ok(self.random_city(rng)?.region.name)
    }

    pub fn birth_place(&self, rng: &mut FakerRng) -> FakerResult<BirthPlaceSummary> {
        Ok(BirthPlaceSummary::from(&self.random_city(rng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_builder_sets_fields() {
        let filter = CityFilter::default().region("Lazio").province("Roma");
        assert_eq!(filter.region.as_deref(), Some("Lazio"));
        assert_eq!(filter.province.as_deref(), Some("Roma"));
        assert!(filter.belfiore_code.is_none());
    }

    #[test]
    fn zero_population_keeps_unit_weight() {
        let city = City {
            name: "Ghost".into(),
            code: "000000".into(),
            zone: crate::types::CodeName { code: "1".into(), name: "Nord-ovest".into() },
            region: crate::types::CodeName { code: "01".into(), name: "Piemonte".into() },
            province: crate::types::CodeName { code: "001".into(), name: "Torino".into() },
            province_code: "TO".into(),
            belfiore_code: "Z999".into(),
            postal_codes: vec![],
            population: 0,
        };
        assert_eq!(population_weight(&city), 1);
    }
}
