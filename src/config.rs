//! Configuration for a [`RandomContext`](crate::context::RandomContext).
//!
//! This module defines which entropy devices are considered, how providers
//! are probed, and which strategy is used to reduce raw draws into bounded
//! integers.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Number of raw bytes consumed by a single numeric draw.
pub const DRAW_LEN: usize = 8;

/// Reduction of a raw 64-bit draw into `[0, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundedStrategy {
    /// `value % max`. Biased when `2^64 % max != 0`; kept for compatible
    /// output sequences.
    Modulo,
    /// Redraw until the value falls in the largest multiple of `max`, then
    /// reduce. Strictly uniform at the cost of occasional extra reads.
    Rejection,
}

impl Default for BoundedStrategy {
    fn default() -> Self {
        if cfg!(feature = "unbiased") {
            Self::Rejection
        } else {
            Self::Modulo
        }
    }
}

/// Settings shared by every provider and draw of a context.
///
/// # Defaults
///
/// - `devices`: `/dev/urandom`, then `/dev/random` on Unix; none elsewhere
/// - `probe_len`: 2 bytes
/// - `bounded_strategy`: [`BoundedStrategy::Modulo`] unless the `unbiased`
///   feature is enabled
/// - `read_timeout`: none, a stalled device stalls the caller
#[derive(Clone, Debug)]
pub struct RandomConfig {
    /// Ordered candidate entropy devices.
    pub devices: Vec<PathBuf>,
    /// Size of the trial read used to validate a provider.
    pub probe_len: usize,
    /// Reduction used by [`RandomSource::draw_bounded`](crate::source::RandomSource::draw_bounded).
    pub bounded_strategy: BoundedStrategy,
    /// Upper bound on a single device read.
    pub read_timeout: Option<Duration>,
}

impl RandomConfig {
    /// Replaces the candidate devices, keeping their order.
    pub fn with_devices<I, P>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the size of the trial read. Must be at least 1.
    pub fn with_probe_len(mut self, probe_len: usize) -> Self {
        self.probe_len = probe_len;
        self
    }

    /// Selects how bounded draws are reduced.
    pub fn with_bounded_strategy(mut self, strategy: BoundedStrategy) -> Self {
        self.bounded_strategy = strategy;
        self
    }

    /// Bounds every device read. Must be non-zero.
    ///
    /// Each timed read runs on its own thread. A read that times out leaves
    /// that thread blocked on the device, so a device that keeps stalling
    /// accumulates one blocked thread per attempt.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_len == 0 {
            return Err(ConfigError::Invalid("probe length must be at least 1 byte"));
        }

        if self.read_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Invalid("read timeout must be non-zero"));
        }

        Ok(())
    }
}

fn platform_devices() -> Vec<PathBuf> {
    if cfg!(unix) {
        vec![PathBuf::from("/dev/urandom"), PathBuf::from("/dev/random")]
    } else {
        Vec::new()
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            devices: platform_devices(),
            probe_len: 2,
            bounded_strategy: BoundedStrategy::default(),
            read_timeout: None,
        }
    }
}
