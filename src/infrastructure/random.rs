// Random sources backing the generator
use crate::application::random_source::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of samples, wrapping around at the end
#[cfg(test)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self { values, index: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
