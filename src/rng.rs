use getrandom::getrandom;
use oorandom::Rand64;

/// A source of uniformly distributed random numbers.
///
/// Path construction only ever asks for a single uniform sample per step,
/// so anything that can hand out floats in `[0, 1)` can drive an ant.
pub trait RandomSource {
    /// Returns a float in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    fn next_u64(&mut self) -> u64;

    /// Draws a full 128 bit seed, used to spawn independent child streams.
    fn next_seed(&mut self) -> u128 {
        self.next_u64() as u128 + ((self.next_u64() as u128) << 64)
    }
}

impl RandomSource for Rand64 {
    fn next_float(&mut self) -> f64 {
        self.rand_float()
    }

    fn next_u64(&mut self) -> u64 {
        self.rand_u64()
    }
}

/// Deterministic source cycling through a fixed list of samples.
/// Useful to force specific transition choices.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    position: usize,
}

impl FixedSequence {
    /// Values are expected in `[0, 1)`. An empty list behaves like `[0.0]`.
    pub fn new(values: Vec<f64>) -> Self {
        FixedSequence {
            values,
            position: 0,
        }
    }
}

impl RandomSource for FixedSequence {
    fn next_float(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        (self.next_float() * u64::MAX as f64) as u64
    }
}

pub fn preseeded_rng64() -> Rand64 {
    Rand64::new(os_random_seed())
}

pub fn rng64(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    if let Err(error) = getrandom(&mut buf) {
        tracing::warn!("could not read OS randomness, falling back to zero seed: {}", error);
    }
    u128::from_le_bytes(buf)
}
