use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Generator settings. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerConfig {
    /// Master seed for every RNG stream. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Directory holding the reference JSON files. `None` uses the embedded copy.
    ///
    /// The embedded copy is a small sample. Full ISTAT datasets in the same
    /// schema and file names can be supplied here and are read through
    /// `DirectoryData`.
    pub data_dir: Option<String>,
    pub default_min_age: u32,
    pub default_max_age: u32,
    /// Share of surname draws taken from the local (province/region) list.
    pub regional_surname_weight: f64,
    /// Chance that a complete address carries staircase/floor/flat details.
    pub apartment_detail_rate: f64,
    /// Chance that a building number carries a suffix (`12B`, `7bis`).
    pub building_suffix_rate: f64,
    /// Date ages are measured against. `None` means today.
    pub reference_date: Option<NaiveDate>,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            default_min_age: 18,
            default_max_age: 80,
            regional_surname_weight: 0.5,
            apartment_detail_rate: 0.05,
            building_suffix_rate: 0.05,
            reference_date: None,
        }
    }
}

impl FakerConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: FakerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a fixed seed and reference date for use in tests.
    pub fn default_test() -> Self {
        Self {
            seed: Some(42),
            reference_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_min_age > self.default_max_age {
            anyhow::bail!(
                "default_min_age ({}) must not exceed default_max_age ({})",
                self.default_min_age,
                self.default_max_age
            );
        }
        for (key, value) in [
            ("regional_surname_weight", self.regional_surname_weight),
            ("apartment_detail_rate", self.apartment_detail_rate),
            ("building_suffix_rate", self.building_suffix_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{key} must be within [0, 1], got {value}");
            }
        }
        Ok(())
    }

    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
