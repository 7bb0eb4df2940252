//! Error taxonomy.
//!
//! Every failure in this crate is explicit. Nothing falls back to weaker
//! randomness on its own: a provider that cannot deliver bytes surfaces an
//! [`EntropyError`], a misconfigured device surfaces a [`ConfigError`], and
//! caller misuse surfaces an [`ArgumentError`] or [`TypeError`].
//!
//! [`Error`] is the umbrella type returned by operations that can fail in
//! more than one family (draws and sampling).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A requested device or provider cannot be used as configured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The device cannot be opened for reading.
    #[error("device `{}` is not readable and therefore makes a bad random device", path.display())]
    Unreadable { path: PathBuf },
    /// The descriptor does not carry a `random_bytes` capability.
    #[error("provider `{name}` does not have a `random_bytes` capability")]
    MissingCapability { name: String },
    /// A registry must always hold at least one candidate.
    #[error("no candidate entropy providers were supplied")]
    NoCandidates,
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Failure to obtain bytes from an entropy provider at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntropyError {
    /// The source could not be opened, or yielded fewer bytes than requested.
    #[error("entropy source `{provider}` is unreadable: {reason}")]
    Unreadable { provider: String, reason: String },
    /// No candidate provider passed the probe.
    #[error("no entropy provider is available")]
    NoProviderAvailable,
    /// A device read did not complete within the configured timeout.
    #[error("entropy source `{provider}` timed out after {after:?}")]
    Timeout { provider: String, after: Duration },
}

impl EntropyError {
    pub(crate) fn unreadable(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unreadable {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }
}

/// Caller misuse of the draw and sampling operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// A bounded draw was requested with a bound of zero.
    #[error("bound must be a positive integer")]
    InvalidBound,
    /// Sampling was requested from a collection with no elements.
    #[error("cannot pick from an empty collection")]
    EmptyCollection,
}

/// A collection does not provide the access it claims to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TypeError {
    /// The collection reported `size` elements but had none at `index`.
    #[error("unable to pick index {index} from a collection reporting size {size}")]
    UnsupportedCollection { index: usize, size: usize },
}

/// Any error produced while drawing or sampling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Type(#[from] TypeError),
}
