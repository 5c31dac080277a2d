//! Surname generation with regional flavour.
//!
//! Selection policy:
//!   1. province given and known → local list with probability
//!      `regional_weight`, nationwide list otherwise;
//!   2. else region given and known → same split over the region's
//!      aggregated provincial lists;
//!   3. else → nationwide list, weighted by frequency.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    cache::LoadOnce,
    dataset::{self, DataSource, Dataset, EmbeddedData},
    error::FakerResult,
    first_name::format_italian_name,
    rng::FakerRng,
    types::WeightedTable,
    weighted::WeightedSelector,
};

pub const DEFAULT_REGIONAL_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastNameOptions {
    pub region: Option<String>,
    pub province: Option<String>,
}

impl LastNameOptions {
    pub fn is_unconstrained(&self) -> bool {
        self.region.is_none() && self.province.is_none()
    }
}

struct LastNameData {
    nationwide: WeightedSelector<String>,
    by_province: HashMap<String, Vec<String>>,
    by_region: HashMap<String, Vec<String>>,
}

impl LastNameData {
    fn local_pool(&self, options: &LastNameOptions) -> Option<&[String]> {
        let province = options
            .province
            .as_deref()
            .and_then(|p| self.by_province.get(&p.trim().to_lowercase()))
            .filter(|pool| !pool.is_empty());
        if province.is_some() {
            return province.map(Vec::as_slice);
        }
        options
            .region
            .as_deref()
            .and_then(|r| self.by_region.get(&r.trim().to_lowercase()))
            .filter(|pool| !pool.is_empty())
            .map(Vec::as_slice)
    }
}

pub struct LastNameCatalog {
    source: Arc<dyn DataSource>,
    regional_weight: f64,
    data: LoadOnce<LastNameData>,
}

impl LastNameCatalog {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            regional_weight: DEFAULT_REGIONAL_WEIGHT,
            data: LoadOnce::new("last_name"),
        }
    }

    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedData))
    }

    /// Share of constrained draws that come from the local list.
    pub fn with_regional_weight(mut self, weight: f64) -> Self {
        self.regional_weight = weight.clamp(0.0, 1.0);
        self
    }

    fn data(&self) -> FakerResult<Arc<LastNameData>> {
        self.data.get_or_load(|| {
            let nationwide: WeightedTable = dataset::load_table(self.source.as_ref(), Dataset::LastNames)?;
            let regional = dataset::load_regional_surnames(self.source.as_ref())?;

            let mut by_province: HashMap<String, Vec<String>> = HashMap::new();
            let mut by_region: HashMap<String, Vec<String>> = HashMap::new();
            for entry in regional {
                by_province
                    .entry(entry.province.trim().to_lowercase())
                    .or_default()
                    .extend(entry.surnames.iter().cloned());
                by_region
                    .entry(entry.region.trim().to_lowercase())
                    .or_default()
                    .extend(entry.surnames);
            }

            Ok(LastNameData {
                nationwide: WeightedSelector::new(nationwide.items)?,
                by_province,
                by_region,
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

    pub fn last_name(&self, rng: &mut FakerRng, options: &LastNameOptions) -> FakerResult<String> {
        let data = self.data()?;
        let raw = match data.local_pool(options) {
            Some(pool) if rng.chance(self.regional_weight) => rng.pick(pool),
            _ => data.nationwide.select(rng),
        };
        Ok(format_italian_name(raw))
    }

    /// Formatted local surnames for a province or region, empty if unknown.
    pub fn local_surnames(&self, options: &LastNameOptions) -> FakerResult<Vec<String>> {
        let data = self.data()?;
        Ok(data
            .local_pool(options)
            .map(|pool| pool.iter().map(|s| format_italian_name(s)).collect())
            .unwrap_or_default())
    }

    /// Formatted nationwide surnames.
    pub fn nationwide_surnames(&self) -> FakerResult<Vec<String>> {
        let data = self.data()?;
        Ok(data.nationwide.values().map(|s| format_italian_name(s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filters_use_nationwide_list() {
        let catalog = LastNameCatalog::embedded();
        let nationwide = catalog.nationwide_surnames().unwrap();
        let options = LastNameOptions {
            region: Some("Atlantide".into()),
            province: Some("Nowhere".into()),
        };
        let mut rng = FakerRng::seeded(8);
        for _ in 0..100 {
            let name = catalog.last_name(&mut rng, &options).unwrap();
            assert!(nationwide.contains(&name), "{name} is not a nationwide surname");
        }
    }

    #[test]
    fn unknown_province_falls_back_to_region() {
        let catalog = LastNameCatalog::embedded();
        let options = LastNameOptions {
            region: Some("sardegna".into()),
            province: Some("Nowhere".into()),
        };
        let local = catalog.local_surnames(&options).unwrap();
        assert!(local.contains(&"Melis".to_string()));
        assert!(local.contains(&"Sechi".to_string()));
    }
}
