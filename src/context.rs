//! Randomness context.
//!
//! A [`RandomContext`] owns everything a draw depends on: the
//! configuration, the entropy device registry and the provider registry.
//! Draws and samplers borrow a context explicitly, so tests can build an
//! isolated one around a deterministic provider.
//!
//! For code that wants a single shared source, [`RandomContext::global`]
//! returns a process-wide context built from the default configuration on
//! first use.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::RandomConfig;
use crate::error::{ConfigError, EntropyError};
use crate::provider::{
    CsprngProvider, DeviceEntropyProvider, DeviceRegistry, ProviderDescriptor, ProviderRegistry,
};
use crate::randomizer::Randomizer;
use crate::source::RandomSource;

static GLOBAL: Lazy<RandomContext> = Lazy::new(RandomContext::new);

/// Owner of the device defaults and provider selection.
pub struct RandomContext {
    config: RandomConfig,
    devices: Arc<DeviceRegistry>,
    providers: ProviderRegistry,
}

impl RandomContext {
    /// A context over the default configuration.
    pub fn new() -> Self {
        let config = RandomConfig::default();
        let devices = Arc::new(DeviceRegistry::new(config.devices.clone()));
        let providers = default_registry(&config, &devices);

        Self {
            config,
            devices,
            providers,
        }
    }

    /// A context seeded with the entropy devices of `config`, followed by
    /// the library-backed generator.
    pub fn with_config(config: RandomConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let devices = Arc::new(DeviceRegistry::new(config.devices.clone()));
        let providers = default_registry(&config, &devices);

        Ok(Self {
            config,
            devices,
            providers,
        })
    }

    /// A context whose candidates are exactly `providers`, in order.
    pub fn with_providers(
        config: RandomConfig,
        providers: Vec<ProviderDescriptor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let devices = Arc::new(DeviceRegistry::new(config.devices.clone()));
        let providers = ProviderRegistry::new(providers, config.probe_len)?;

        Ok(Self {
            config,
            devices,
            providers,
        })
    }

    /// The process-wide context, built from the default configuration on
    /// first use.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The configuration the context was built from.
    pub fn config(&self) -> &RandomConfig {
        &self.config
    }

    /// Candidate entropy devices and the resolved default.
    pub fn devices(&self) -> &Arc<DeviceRegistry> {
        &self.devices
    }

    /// Candidate providers and the active selection.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Reads `count` raw bytes from the active provider.
    pub fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError> {
        self.providers.active_provider()?.random_bytes(count)
    }

    /// A draw source over this context.
    pub fn source(&self) -> RandomSource<'_> {
        RandomSource::new(self)
    }

    /// A sampler drawing through [`RandomContext::source`].
    pub fn randomizer(&self) -> Randomizer<RandomSource<'_>> {
        Randomizer::new(self.source())
    }
}

impl Default for RandomContext {
    fn default() -> Self {
        Self::new()
    }
}

fn default_registry(config: &RandomConfig, devices: &Arc<DeviceRegistry>) -> ProviderRegistry {
    let mut device = DeviceEntropyProvider::following_default(Arc::clone(devices));
    if let Some(timeout) = config.read_timeout {
        device = device.with_read_timeout(timeout);
    }

    ProviderRegistry::seeded(
        vec![
            ProviderDescriptor::new("device", device),
            ProviderDescriptor::new("csprng", CsprngProvider::new()),
        ],
        config.probe_len,
    )
}
