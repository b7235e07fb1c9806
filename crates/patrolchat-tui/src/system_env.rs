//! Production Environment implementation using system time and RNG.
//!
//! `SystemEnv` is the production implementation of the Environment trait using
//! real system time and OS randomness.
//!
//! # Capabilities
//!
//! - Real system time (`std::time::Instant`) that advances naturally
//! - OS RNG (getrandom) by default, or a seeded `StdRng` when replies should
//!   be reproducible across runs

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use patrolchat_app::Environment;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Production environment using system time.
///
/// Randomness comes from getrandom unless the environment was created with
/// [`SystemEnv::seeded`]. Clones of a seeded environment share one stream.
#[derive(Clone, Default)]
pub struct SystemEnv {
    seeded: Option<Arc<Mutex<StdRng>>>,
}

impl SystemEnv {
    /// Create a system environment backed by the OS RNG.
    #[must_use]
    pub fn new() -> Self {
        Self { seeded: None }
    }

    /// Create a system environment with a reproducible RNG stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { seeded: Some(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))) }
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn wall_clock(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        if let Some(rng) = &self.seeded {
            rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
            return;
        }
        // Zeroed draws never schedule a reply, which is a safe degradation.
        if let Err(e) = getrandom::fill(buffer) {
            tracing::warn!("OS RNG unavailable, replies disabled for this draw: {e}");
            buffer.fill(0);
        }
    }
}
