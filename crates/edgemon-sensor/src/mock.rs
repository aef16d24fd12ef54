//! # Mock DHT22: Bounded Random Walk
//!
//! Each quantity drifts by a Normal step per sample and is held inside its
//! configured interval by a clamp-then-nudge policy:
//!
//! 1. Step temperature, then humidity, by `Normal(0, sigma)`.
//! 2. For temperature, then humidity: if the value left `[min, max]`, clamp
//!    it to the nearest bound and add one more `Normal(0, sigma)` draw,
//!    negated. The nudge is re-clamped into the interval without drawing.
//! 3. Round both values to one decimal (round half to even) for output.
//!    The unrounded values stay as walk state.
//!
//! This is not a mirror reflection of the overshoot, and must not become
//! one: a clamping sample consumes exactly one extra draw per channel, so
//! the sequence after N samples depends on how many of them clamped.
//!
//! ## Determinism
//!
//! Two generators built with the same seed and config yield identical
//! sequences. The PRNG is ChaCha8, whose output for a given seed is stable
//! across platforms and `rand_chacha` releases. Without a seed the PRNG is
//! seeded from OS entropy.

use edgemon_core::EdgemonError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{ChannelConfig, WalkConfig};

/// One rounded output pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Degrees Celsius, one decimal.
    pub temperature_c: f64,
    /// Relative humidity in percent, one decimal.
    pub humidity: f64,
}

/// A walked quantity: current unrounded value plus its bounds and step.
#[derive(Debug, Clone)]
struct Channel {
    value: f64,
    min: f64,
    max: f64,
    step: Normal<f64>,
}

impl Channel {
    fn new(config: &ChannelConfig) -> Result<Self, EdgemonError> {
        let step = Normal::new(0.0, config.step_sigma).map_err(|e| {
            EdgemonError::InvalidConfig(format!("step_sigma {}: {e}", config.step_sigma))
        })?;
        Ok(Self {
            value: config.start,
            min: config.min,
            max: config.max,
            step,
        })
    }

    fn drift(&mut self, rng: &mut ChaCha8Rng) {
        self.value += self.step.sample(rng);
    }

    fn contain(&mut self, rng: &mut ChaCha8Rng) {
        if self.value < self.min || self.value > self.max {
            self.value = self.value.clamp(self.min, self.max);
            self.value -= self.step.sample(rng);
            self.value = self.value.clamp(self.min, self.max);
        }
    }
}

/// Mock temperature/humidity sensor.
///
/// Owns its PRNG and walk state exclusively; nothing else observes or
/// mutates them.
///
/// ```
/// use edgemon_sensor::{MockDht22, WalkConfig};
///
/// let mut a = MockDht22::new(WalkConfig::default(), Some(42)).unwrap();
/// let mut b = MockDht22::new(WalkConfig::default(), Some(42)).unwrap();
/// assert_eq!(a.sample(), b.sample());
/// ```
#[derive(Debug, Clone)]
pub struct MockDht22 {
    rng: ChaCha8Rng,
    temperature: Channel,
    humidity: Channel,
}

impl MockDht22 {
    /// Build a generator. `seed: None` draws the seed from OS entropy.
    pub fn new(config: WalkConfig, seed: Option<u64>) -> Result<Self, EdgemonError> {
        config.validate()?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            rng,
            temperature: Channel::new(&config.temperature)?,
            humidity: Channel::new(&config.humidity)?,
        })
    }

    /// Advance the walk one step and return the rounded pair.
    pub fn sample(&mut self) -> Sample {
        self.temperature.drift(&mut self.rng);
        self.humidity.drift(&mut self.rng);

        self.temperature.contain(&mut self.rng);
        self.humidity.contain(&mut self.rng);

        Sample {
            temperature_c: round_tenths(self.temperature.value),
            humidity: round_tenths(self.humidity.value),
        }
    }

    /// Current unrounded temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature.value
    }

    /// Current unrounded humidity.
    pub fn humidity(&self) -> f64 {
        self.humidity.value
    }
}

impl Iterator for MockDht22 {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.sample())
    }
}

/// Round to one decimal place, ties to even.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Independently built generators with the same seed agree.
        #[test]
        fn test_same_seed_is_deterministic(seed in any::<u64>(), n in 1usize..300) {
            let a: Vec<Sample> = MockDht22::new(WalkConfig::default(), Some(seed)).unwrap().take(n).collect();
            let b: Vec<Sample> = MockDht22::new(WalkConfig::default(), Some(seed)).unwrap().take(n).collect();
            prop_assert_eq!(a, b);
        }

        /// Samples stay inside the configured bounds for any seed.
        #[test]
        fn test_default_bounds_hold(seed in any::<u64>()) {
            let mut sensor = MockDht22::new(WalkConfig::default(), Some(seed)).unwrap();
            for _ in 0..2_000 {
                let s = sensor.sample();
                prop_assert!((18.0..=30.0).contains(&s.temperature_c), "{:?}", s);
                prop_assert!((30.0..=70.0).contains(&s.humidity), "{:?}", s);
                prop_assert!((18.0..=30.0).contains(&sensor.temperature()));
                prop_assert!((30.0..=70.0).contains(&sensor.humidity()));
            }
        }

        /// Tight custom bounds with a large step still hold.
        #[test]
        fn test_narrow_bounds_hold(seed in any::<u64>(), sigma in 0.0f64..5.0) {
            let mut cfg = WalkConfig::default();
            cfg.temperature = ChannelConfig { start: 20.0, min: 19.5, max: 20.5, step_sigma: sigma };
            let mut sensor = MockDht22::new(cfg, Some(seed)).unwrap();
            for _ in 0..500 {
                sensor.sample();
                prop_assert!((19.5..=20.5).contains(&sensor.temperature()));
            }
        }
    }
}
