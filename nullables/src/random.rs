//! Nullable random: deterministic unit samples.

use estate_market::RandomSource;
use std::sync::Mutex;

/// Returns pre-configured samples in order, cycling when exhausted.
pub struct NullRandom {
    outputs: Vec<f64>,
    index: Mutex<usize>,
}

impl NullRandom {
    /// Create with a sequence of samples, each in `[0, 1)`.
    pub fn new(outputs: Vec<f64>) -> Self {
        assert!(!outputs.is_empty(), "NullRandom needs at least one sample");
        Self {
            outputs,
            index: Mutex::new(0),
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples handed out so far.
    pub fn draws(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl RandomSource for NullRandom {
    fn next_unit(&self) -> f64 {
        let mut idx = self.index.lock().unwrap();
        let value = self.outputs[*idx % self.outputs.len()];
        *idx += 1;
        value
    }
}
