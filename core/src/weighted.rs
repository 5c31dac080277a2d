//! Proportional sampling over a (value, weight) catalog.
//!
//! Two strategies, picked once at construction:
//!   - small catalogs (≤ SMALL_CATALOG_THRESHOLD entries and a modest total
//!     weight) flatten into an index table, each entry repeated `weight`
//!     times, and draw a uniform slot: O(1) per draw.
//!   - everything else keeps a cumulative prefix array over entries sorted by
//!     descending weight and binary-searches a uniform point in
//!     [0, total): O(log N) per draw, O(N) memory.

use crate::{
    error::{FakerError, FakerResult},
    rng::FakerRng,
    types::WeightedItem,
};

/// Catalogs at or below this many entries may use the flattened table.
pub const SMALL_CATALOG_THRESHOLD: usize = 100;

/// Flattening is skipped above this total weight, whatever the entry count.
pub const FLATTEN_WEIGHT_CAP: u64 = 10_000;

enum Strategy {
    Flattened(Vec<usize>),
    Cumulative {
        order: Vec<usize>,
        cumulative: Vec<u64>,
    },
}

/// Immutable weighted catalog. Build once, draw many times.
pub struct WeightedSelector<T> {
    items: Vec<T>,
    weights: Vec<u64>,
    total_weight: u64,
    strategy: Strategy,
}

impl<T> WeightedSelector<T> {
    pub fn new(items: Vec<WeightedItem<T>>) -> FakerResult<Self> {
        if items.is_empty() {
            return Err(FakerError::EmptyCatalog);
        }

        let (values, weights): (Vec<T>, Vec<u64>) =
            items.into_iter().map(|i| (i.value, i.weight)).unzip();
        let total_weight: u64 = weights.iter().sum();
        if total_weight == 0 {
            return Err(FakerError::ZeroTotalWeight);
        }

        let strategy = if values.len() <= SMALL_CATALOG_THRESHOLD && total_weight <= FLATTEN_WEIGHT_CAP {
            Self::flatten(&weights, total_weight)
        } else {
            Self::accumulate(&weights)
        };

        Ok(Self {
            items: values,
            weights,
            total_weight,
            strategy,
        })
    }

    /// Every value gets the same weight.
    pub fn uniform(values: Vec<T>) -> FakerResult<Self> {
        Self::new(values.into_iter().map(|v| WeightedItem::new(v, 1)).collect())
    }

    fn flatten(weights: &[u64], total_weight: u64) -> Strategy {
        let mut slots = Vec::with_capacity(total_weight as usize);
        for (index, &weight) in weights.iter().enumerate() {
            slots.extend(std::iter::repeat(index).take(weight as usize));
        }
        Strategy::Flattened(slots)
    }

    fn accumulate(weights: &[u64]) -> Strategy {
        let mut order: Vec<usize> = (0..weights.len()).collect();
        // Stable: equal weights keep catalog order.
        order.sort_by(|&a, &b| weights[b].cmp(&weights[a]));

        let mut running = 0u64;
        let cumulative = order
            .iter()
            .map(|&i| {
                running += weights[i];
                running
            })
            .collect();
        Strategy::Cumulative { order, cumulative }
    }

    /// Index (in construction order) of one weighted draw.
    pub fn select_index(&self, rng: &mut FakerRng) -> usize {
        match &self.strategy {
            Strategy::Flattened(slots) => slots[rng.next_index(slots.len())],
            Strategy::Cumulative { order, cumulative } => {
                let target = rng.next_u64_below(self.total_weight);
                // First prefix strictly above the draw; zero-weight entries
                // share their predecessor's prefix and are skipped.
                let pos = cumulative.partition_point(|&c| c <= target);
                order[pos]
            }
        }
    }

    pub fn select(&self, rng: &mut FakerRng) -> &T {
        &self.items[self.select_index(rng)]
    }

    /// `count` independent draws, with replacement.
    pub fn select_many(&self, rng: &mut FakerRng, count: usize) -> Vec<&T> {
        (0..count).map(|_| self.select(rng)).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn is_flattened(&self) -> bool {
        matches!(self.strategy, Strategy::Flattened(_))
    }

    pub fn weight_of(&self, index: usize) -> Option<u64> {
        self.weights.get(index).copied()
    }

    /// Expected draw probability of the entry at `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.weight_of(index)
            .map(|w| w as f64 / self.total_weight as f64)
            .unwrap_or(0.0)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
