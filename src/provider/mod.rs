//! Entropy providers.
//!
//! An entropy provider is anything able to produce `N` raw random bytes on
//! demand, or fail. This module defines that capability and the concrete
//! providers shipped with the crate:
//!
//! - [`DeviceEntropyProvider`]  
//!   Reads from an OS entropy device addressed by path (e.g.
//!   `/dev/urandom`). Device resolution and the process default live in
//!   [`DeviceRegistry`].
//!
//! - [`CsprngProvider`]  
//!   Library-backed provider: a ChaCha20 DRBG seeded from the operating
//!   system on first use.
//!
//! - [`FixedBytesProvider`]  
//!   Replays a fixed byte script. Not random; meant for reproducible tests.
//!
//! Providers enter a [`ProviderRegistry`] through a [`ProviderDescriptor`],
//! which names the provider and carries its `random_bytes` capability. The
//! registry probes candidates in order and caches the first working one.

use std::fmt;
use std::sync::Arc;

use crate::error::EntropyError;

mod csprng;
mod device;
mod fixed;
mod registry;

pub use csprng::CsprngProvider;
pub use device::{DeviceEntropyProvider, DeviceRegistry};
pub use fixed::FixedBytesProvider;
pub use registry::ProviderRegistry;

/// Capability to produce raw random bytes.
///
/// Implementations must return exactly `count` bytes or an error; a short
/// result is treated as a failure by every caller in this crate.
pub trait EntropyProvider: Send + Sync {
    fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError>;
}

/// A named handle on a provider, as held by a [`ProviderRegistry`].
///
/// Descriptors are cheap to clone and compare by identity: two clones of
/// the same descriptor are equal, two descriptors wrapping separately
/// constructed providers are not, even if the providers behave the same.
///
/// A descriptor may lack the `random_bytes` capability altogether (see
/// [`ProviderDescriptor::without_capability`]); the registry rejects such
/// descriptors at registration.
#[derive(Clone)]
pub struct ProviderDescriptor {
    name: Arc<str>,
    provider: Option<Arc<dyn EntropyProvider>>,
}

impl ProviderDescriptor {
    /// Wraps `provider` under `name`.
    pub fn new<P: EntropyProvider + 'static>(name: &str, provider: P) -> Self {
        Self::from_shared(name, Arc::new(provider))
    }

    /// Wraps an already shared provider under `name`.
    pub fn from_shared(name: &str, provider: Arc<dyn EntropyProvider>) -> Self {
        Self {
            name: Arc::from(name),
            provider: Some(provider),
        }
    }

    /// Describes a provider that cannot produce bytes, e.g. a name taken
    /// from configuration that resolves to nothing.
    pub fn without_capability(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            provider: None,
        }
    }

    /// The name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the descriptor can produce bytes.
    pub fn has_random_bytes(&self) -> bool {
        self.provider.is_some()
    }

    /// Reads `count` bytes from the wrapped provider.
    ///
    /// Fails with [`EntropyError::Unreadable`] if the descriptor has no
    /// capability or the provider returns the wrong number of bytes.
    pub fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| EntropyError::unreadable(self.name(), "no random_bytes capability"))?;

        let bytes = provider.random_bytes(count)?;

        if bytes.len() != count {
            return Err(EntropyError::unreadable(
                self.name(),
                format!("returned {} bytes, expected {count}", bytes.len()),
            ));
        }

        Ok(bytes)
    }

    /// Identity comparison.
    pub fn is(&self, other: &Self) -> bool {
        match (&self.provider, &other.provider) {
            (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (None, None) => Arc::ptr_eq(&self.name, &other.name),
            _ => false,
        }
    }
}

impl PartialEq for ProviderDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for ProviderDescriptor {}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("random_bytes", &self.has_random_bytes())
            .finish()
    }
}
