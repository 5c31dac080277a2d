//! Deterministic random number generation.
//!
//! RULE: No generator may call a platform RNG.
//! All randomness flows through FakerRng instances derived
//! from a single master seed.
//!
//! Each generator module gets its own stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Adding a new module never changes existing modules' streams.
//!   - Each module's stream is fully reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct FakerRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FakerRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// A single stream seeded directly, for tests and one-off draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(seed, 0)
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    ///
    /// Uses widening multiplication so large `n` (catalog total weights)
    /// stay unbiased enough for sampling.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        ((self.inner.next_u64() as u128 * n as u128) >> 64) as u64
    }

    /// Roll an index in [0, n).
    pub fn next_index(&mut self, n: usize) -> usize {
        self.next_u64_below(n as u64) as usize
    }

    /// Roll an i64 in [low, high] (inclusive).
    pub fn next_i64_between(&mut self, low: i64, high: i64) -> i64 {
        assert!(low <= high, "low must be <= high");
        let span = (high - low) as u64 + 1;
        low + self.next_u64_below(span) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        &items[self.next_index(items.len())]
    }

    /// `count` decimal digits as a string.
    pub fn digits(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| char::from(b'0' + self.next_u64_below(10) as u8))
            .collect()
    }
}

/// All generator streams for a single faker instance, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_slot(&self, slot: StreamSlot) -> FakerRng {
        FakerRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every module's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Places = 0,
    FirstName = 1,
    LastName = 2,
    Person = 3,
    FiscalCode = 4,
    Address = 5,
    Contacts = 6,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Person => "person",
            Self::FiscalCode => "fiscal_code",
            Self::Address => "address",
            Self::Contacts => "contacts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank = RngBank::new(42);
        let mut a = bank.for_slot(StreamSlot::Places);
        let mut b = bank.for_slot(StreamSlot::Places);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn slots_produce_independent_streams() {
        let bank = RngBank::new(42);
        let mut a = bank.for_slot(StreamSlot::Places);
        let mut b = bank.for_slot(StreamSlot::FirstName);
        let draws_a: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let draws_b: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(draws_a, draws_b, "Distinct slots must not share a stream");
    }

    #[test]
    fn bounded_draws_stay_in_range() {
        let mut rng = FakerRng::seeded(7);
        for _ in 0..1_000 {
            assert!(rng.next_u64_below(13) < 13);
            let v = rng.next_i64_between(-3, 3);
            assert!((-3..=3).contains(&v), "{v} out of [-3, 3]");
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
        assert_eq!(rng.digits(7).len(), 7);
    }
}
