use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::EntropyProvider;
use crate::error::EntropyError;

/// Library-backed provider over [`ChaCha20Rng`].
///
/// The generator is seeded from [`OsRng`] on the first request, so a
/// failing OS source surfaces as an [`EntropyError`] at probe time rather
/// than at construction.
pub struct CsprngProvider {
    rng: Mutex<Option<ChaCha20Rng>>,
}

impl CsprngProvider {
    /// A provider seeded from the operating system on first use.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(None),
        }
    }

    /// A provider whose output is fully determined by `seed`.
    ///
    /// Only for reproducible tests; the seed must be uniformly random for
    /// any other use.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: Mutex::new(Some(ChaCha20Rng::from_seed(seed))),
        }
    }
}

impl Default for CsprngProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyProvider for CsprngProvider {
    fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError> {
        let mut guard = self.rng.lock();

        if guard.is_none() {
            let rng = ChaCha20Rng::from_rng(OsRng)
                .map_err(|err| EntropyError::unreadable("os", err))?;
            *guard = Some(rng);
            log::debug!("seeded chacha20 from the operating system");
        }

        let mut out = vec![0u8; count];
        if let Some(rng) = guard.as_mut() {
            rng.fill_bytes(&mut out);
        }

        Ok(out)
    }
}
