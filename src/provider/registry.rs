//! Ordered provider candidates and the cached active provider.

use parking_lot::Mutex;

use super::ProviderDescriptor;
use crate::error::{ConfigError, EntropyError};

struct RegistryState {
    candidates: Vec<ProviderDescriptor>,
    active: Option<ProviderDescriptor>,
}

/// Holds candidate providers and selects a working one.
///
/// The active provider is chosen by probing candidates in registration
/// order. The choice is cached and re-validated against the candidate list
/// on every read: if the cached provider is no longer a candidate the scan
/// runs again. The scan happens under the registry lock, so concurrent
/// callers always agree on the selection.
pub struct ProviderRegistry {
    probe_len: usize,
    state: Mutex<RegistryState>,
}

fn check_capability(descriptor: &ProviderDescriptor) -> Result<(), ConfigError> {
    if descriptor.has_random_bytes() {
        Ok(())
    } else {
        Err(ConfigError::MissingCapability {
            name: descriptor.name().to_string(),
        })
    }
}

impl ProviderRegistry {
    /// Builds a registry over `candidates`, which must be non-empty and
    /// all capable of producing bytes.
    pub fn new(candidates: Vec<ProviderDescriptor>, probe_len: usize) -> Result<Self, ConfigError> {
        if candidates.is_empty() {
            return Err(ConfigError::NoCandidates);
        }

        candidates.iter().try_for_each(check_capability)?;

        let mut unique: Vec<ProviderDescriptor> = Vec::with_capacity(candidates.len());
        for descriptor in candidates {
            if !unique.contains(&descriptor) {
                unique.push(descriptor);
            }
        }

        Ok(Self::seeded(unique, probe_len))
    }

    pub(crate) fn seeded(candidates: Vec<ProviderDescriptor>, probe_len: usize) -> Self {
        Self {
            probe_len,
            state: Mutex::new(RegistryState {
                candidates,
                active: None,
            }),
        }
    }

    /// Appends `descriptor` to the candidates unless it is already one.
    pub fn register(&self, descriptor: ProviderDescriptor) -> Result<(), ConfigError> {
        check_capability(&descriptor)?;

        let mut state = self.state.lock();

        if !state.candidates.contains(&descriptor) {
            log::debug!("registered entropy provider `{}`", descriptor.name());
            state.candidates.push(descriptor);
        }

        Ok(())
    }

    /// Registers `descriptor` and makes it active without probing it.
    pub fn set_active(&self, descriptor: ProviderDescriptor) -> Result<(), ConfigError> {
        self.register(descriptor.clone())?;

        log::info!("active entropy provider set to `{}`", descriptor.name());
        self.state.lock().active = Some(descriptor);

        Ok(())
    }

    /// Drops `descriptor` from the candidates.
    ///
    /// Returns whether it was present. Removing the last candidate fails
    /// with [`ConfigError::NoCandidates`].
    pub fn remove(&self, descriptor: &ProviderDescriptor) -> Result<bool, ConfigError> {
        let mut state = self.state.lock();

        let Some(position) = state.candidates.iter().position(|c| c == descriptor) else {
            return Ok(false);
        };

        if state.candidates.len() == 1 {
            return Err(ConfigError::NoCandidates);
        }

        state.candidates.remove(position);
        log::debug!("removed entropy provider `{}`", descriptor.name());

        Ok(true)
    }

    /// The candidates, in registration order.
    pub fn candidates(&self) -> Vec<ProviderDescriptor> {
        self.state.lock().candidates.clone()
    }

    /// Returns the provider used for draws.
    ///
    /// A cached choice that is still a candidate is returned as is.
    /// Otherwise the first candidate whose probe read succeeds becomes
    /// active. Fails with [`EntropyError::NoProviderAvailable`] if none
    /// does.
    pub fn active_provider(&self) -> Result<ProviderDescriptor, EntropyError> {
        let mut state = self.state.lock();

        if let Some(active) = &state.active {
            if state.candidates.contains(active) {
                return Ok(active.clone());
            }
            log::debug!("cached provider `{}` is no longer a candidate", active.name());
        }

        let selected = state
            .candidates
            .iter()
            .find(|candidate| self.probe(candidate))
            .cloned()
            .ok_or(EntropyError::NoProviderAvailable)?;

        log::info!("selected entropy provider `{}`", selected.name());
        state.active = Some(selected.clone());

        Ok(selected)
    }

    fn probe(&self, candidate: &ProviderDescriptor) -> bool {
        match candidate.random_bytes(self.probe_len) {
            Ok(_) => {
                log::trace!("probe of `{}` succeeded", candidate.name());
                true
            }
            Err(err) => {
                log::warn!("probe of `{}` failed: {err}", candidate.name());
                false
            }
        }
    }
}
