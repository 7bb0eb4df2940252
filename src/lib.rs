//! Pluggable, fail-fast randomness for password generation.
//!
//! This crate selects a working source of cryptographically suitable
//! random bytes and derives bounded integers, unit floats and collection
//! samples from it. It does not implement a general-purpose RNG; byte
//! production is delegated to an OS entropy device or to `rand_chacha`'s
//! ChaCha20 generator seeded by the operating system.
//!
//! # Module overview
//!
//! - `provider`  
//!   The [`EntropyProvider`] capability and its implementations: entropy
//!   devices ([`DeviceEntropyProvider`] with the [`DeviceRegistry`] of
//!   candidate paths), the library-backed [`CsprngProvider`], and the
//!   deterministic [`FixedBytesProvider`] for tests. The
//!   [`ProviderRegistry`] probes candidates in order and caches the first
//!   one that delivers.
//!
//! - `context`  
//!   [`RandomContext`] owns the configuration, device registry and provider
//!   registry. Contexts are explicit values; [`RandomContext::global`] is a
//!   lazily built process-wide instance.
//!
//! - `source`  
//!   [`RandomSource`] implements the draw protocol: `draw_unit` in
//!   `[0, 1)` and `draw_bounded` in `[0, max)`, each from 8 raw bytes.
//!
//! - `randomizer`  
//!   [`Randomizer`] samples with replacement from any [`Indexable`]
//!   collection.
//!
//! # Failure model
//!
//! Nothing degrades silently. An unreadable device, a provider without a
//! byte capability, a failed read, a zero bound or an empty collection all
//! surface as an [`Error`] to the caller, who decides whether to retry with
//! another provider.
//!
//! # Logging
//!
//! Provider selection, probes and device fallbacks are reported through
//! the `log` facade. Random bytes are never logged.

pub mod config;
pub mod context;
pub mod error;
pub mod provider;
pub mod randomizer;
pub mod source;

pub use config::{BoundedStrategy, RandomConfig};
pub use context::RandomContext;
pub use error::{ArgumentError, ConfigError, EntropyError, Error, TypeError};
pub use provider::{
    CsprngProvider, DeviceEntropyProvider, DeviceRegistry, EntropyProvider, FixedBytesProvider,
    ProviderDescriptor, ProviderRegistry,
};
pub use randomizer::{Indexable, Randomizer};
pub use source::{RandomDraw, RandomSource};
