//! Placeholder value histories for newly minted listings.

use tracing::warn;

use estate_types::ValuePoint;

pub const HISTORY_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Samples from the operating system's random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_unit(&self) -> f64 {
        let mut buf = [0u8; 8];
        if let Err(e) = getrandom::getrandom(&mut buf) {
            warn!(error = %e, "os random source unavailable, using midpoint");
            return 0.5;
        }
        // 53 high bits, scaled into [0, 1).
        (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Six monthly values around `price`, each `price × (1 + U(-0.05, 0.15))`.
pub fn mock_history(price: f64, rng: &dyn RandomSource) -> Vec<ValuePoint> {
    HISTORY_MONTHS
        .iter()
        .map(|month| ValuePoint {
            month: (*month).to_string(),
            value: price * (1.0 + (rng.next_unit() * 0.2 - 0.05)),
        })
        .collect()
}
