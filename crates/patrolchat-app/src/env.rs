//! Environment abstraction for deterministic testing.
//!
//! Decouples the reply simulator from system resources (time, randomness).
//! Enables deterministic simulation with a virtual clock and seeded RNG, and
//! production use with real system resources.

use std::{
    ops::{Add, Sub},
    time::Duration,
};

use chrono::{DateTime, Utc};

/// Abstract environment providing time and randomness.
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion, incorrect simulation setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use virtual time.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + std::fmt::Debug
        + Add<Duration, Output = Self::Instant>
        + Sub<Output = Duration>;

    /// Current time (monotonic).
    ///
    /// # Invariants
    ///
    /// - Subsequent calls must return times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Current wall-clock time, used for message ids and timestamps.
    ///
    /// Unlike [`Environment::now`] this may jump when the system clock is
    /// adjusted.
    fn wall_clock(&self) -> DateTime<Utc>;

    /// Fills the provided buffer with random bytes.
    ///
    /// Given the same RNG seed, this produces the same sequence of bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Generates a uniformly distributed `f64` in `[0, 1)`.
    ///
    /// Uses the top 53 bits so every representable value is equally likely.
    fn random_unit(&self) -> f64 {
        const MANTISSA_BITS: u32 = 53;
        let bits = self.random_u64() >> (64 - MANTISSA_BITS);
        bits as f64 / (1u64 << MANTISSA_BITS) as f64
    }

    /// Picks a uniformly distributed index in `0..len`.
    ///
    /// Returns `None` for an empty range.
    fn random_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.random_unit() * len as f64) as usize;
        Some(index.min(len - 1))
    }
}
