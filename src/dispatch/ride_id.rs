use std::sync::atomic::{AtomicU64, Ordering};

/// Textual prefix of every ride id
pub const RIDE_ID_PREFIX: &str = "RIDE_";

/// The counter starts here; the first ride issued is `RIDE_1001`
pub const RIDE_ID_SEED: u64 = 1000;

/// Process-wide source of unique ride ids
pub struct RideIdGenerator {
    counter: AtomicU64,
}

impl RideIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(RIDE_ID_SEED)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }

    /// Next (id, sequence) pair, e.g. ("RIDE_1001", 1001)
    pub fn next_id(&self) -> (String, u64) {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        (format!("{}{}", RIDE_ID_PREFIX, sequence), sequence)
    }
}

impl Default for RideIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
