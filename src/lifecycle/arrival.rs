//! Virtual-stock arrival estimation
//!
//! Units built in Germany arrive in 38–52 days, everything else in 90–120.
//! The estimate is sampled once per vehicle and never recomputed; the random
//! source is injectable so tests can pin or seed it.

use crate::config::ArrivalConfig;
use crate::entities::{OriginalStock, Vehicle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync {
    /// Sample uniformly from a closed range
    fn sample(&self, range: RangeInclusive<u32>) -> u32;
}

/// Thread-local OS-seeded RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&self, range: RangeInclusive<u32>) -> u32 {
        rand::thread_rng().gen_range(range)
    }
}

/// Deterministic RNG for reproducible runs
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&self, range: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(range)
    }
}

/// Always returns the same value, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn sample(&self, range: RangeInclusive<u32>) -> u32 {
        self.0.clamp(*range.start(), *range.end())
    }
}

#[derive(Clone)]
pub struct ArrivalEstimator {
    config: ArrivalConfig,
    random: Arc<dyn RandomSource>,
}

impl ArrivalEstimator {
    pub fn new(config: ArrivalConfig, random: Arc<dyn RandomSource>) -> Self {
        Self { config, random }
    }

    /// Estimate lead time in days for a unit of the given origin
    pub fn estimate(&self, origin: Option<OriginalStock>) -> u32 {
        let window = self.config.window_for(origin);
        self.random.sample(window.range())
    }

    /// Estimate for a vehicle that has none yet
    ///
    /// Returns `None` when the vehicle already carries an estimate or is not a
    /// virtual-stock unit with a known origin.
    pub fn ensure(&self, vehicle: &Vehicle) -> Option<u32> {
        if vehicle.estimated_arrival_days.is_some() || !vehicle.is_virtual() {
            return None;
        }
        let origin = vehicle.original_stock?;
        let days = self.estimate(Some(origin));
        tracing::debug!(vehicle_id = %vehicle.id, origin = %origin, days, "estimated arrival");
        Some(days)
    }
}

impl Default for ArrivalEstimator {
    fn default() -> Self {
        Self::new(ArrivalConfig::default(), Arc::new(ThreadRandom))
    }
}
