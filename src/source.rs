//! Numeric draw protocol.
//!
//! Every draw reads [`DRAW_LEN`] raw bytes from the context's active
//! provider and derives a number from them:
//!
//! - [`RandomSource::draw_unit`]
//!   The first four bytes, read as a little-endian `f32`, give a magnitude
//!   that is divided by `f64::MAX`. This keeps output compatible with
//!   existing sequences, but every value lands far below `1e-260`.
//!   [`RandomSource::draw_unit_single`] normalizes the same magnitude by
//!   `f32::MAX` instead, and [`RandomSource::draw_unit_uniform`] is the
//!   uniform alternative.
//!
//! - [`RandomSource::draw_bounded`]
//!   The eight bytes, read as a little-endian `u64`, are reduced into
//!   `[0, max)` with the context's [`BoundedStrategy`]. The default modulo
//!   reduction is slightly biased when `max` does not divide `2^64`; the
//!   rejection strategy is exact.
//!
//! Provider failures propagate unchanged.

use crate::config::{BoundedStrategy, DRAW_LEN};
use crate::context::RandomContext;
use crate::error::{ArgumentError, EntropyError, Error};

/// Redraw limit for draws that discard unusable values.
const MAX_REDRAWS: usize = 64;

/// Anything able to answer the draw protocol.
///
/// [`Randomizer`](crate::randomizer::Randomizer) samples through this
/// trait, so any source with the same semantics can stand in for
/// [`RandomSource`].
pub trait RandomDraw {
    /// A value in `[0, 1)`.
    fn draw_unit(&self) -> Result<f64, Error>;

    /// A value in `[0, max)`. Fails with [`ArgumentError::InvalidBound`]
    /// if `max` is zero.
    fn draw_bounded(&self, max: u64) -> Result<u64, Error>;
}

impl<T: RandomDraw + ?Sized> RandomDraw for &T {
    fn draw_unit(&self) -> Result<f64, Error> {
        (**self).draw_unit()
    }

    fn draw_bounded(&self, max: u64) -> Result<u64, Error> {
        (**self).draw_bounded(max)
    }
}

/// Draws numbers from a [`RandomContext`].
#[derive(Clone, Copy)]
pub struct RandomSource<'a> {
    context: &'a RandomContext,
    strategy: BoundedStrategy,
}

impl<'a> RandomSource<'a> {
    /// A source using the context's configured bounded strategy.
    pub fn new(context: &'a RandomContext) -> Self {
        Self {
            context,
            strategy: context.config().bounded_strategy,
        }
    }

    /// A source over [`RandomContext::global`].
    pub fn global() -> RandomSource<'static> {
        RandomSource::new(RandomContext::global())
    }

    /// Overrides the bounded strategy for this source only.
    pub fn with_strategy(mut self, strategy: BoundedStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The strategy used by [`RandomSource::draw_bounded`].
    pub fn strategy(&self) -> BoundedStrategy {
        self.strategy
    }

    fn raw_draw(&self) -> Result<[u8; DRAW_LEN], EntropyError> {
        let bytes = self.context.random_bytes(DRAW_LEN)?;

        let mut raw = [0u8; DRAW_LEN];
        raw.copy_from_slice(&bytes);

        Ok(raw)
    }

    fn redraws_exhausted(&self) -> Error {
        EntropyError::unreadable(
            "draw",
            format!("no usable value after {MAX_REDRAWS} draws"),
        )
        .into()
    }

    /// A value in `[0, 1)`: a single-precision magnitude divided by
    /// `f64::MAX`.
    ///
    /// Bit patterns that are not finite are discarded and drawn again.
    pub fn draw_unit(&self) -> Result<f64, Error> {
        self.redraw_unit(compatible_unit)
    }

    /// A value in `[0, 1)`: a single-precision magnitude divided by
    /// `f32::MAX`.
    ///
    /// Bit patterns that are not finite, or whose magnitude equals
    /// `f32::MAX`, are discarded and drawn again.
    pub fn draw_unit_single(&self) -> Result<f64, Error> {
        self.redraw_unit(single_unit)
    }

    fn redraw_unit(&self, derive: fn(&[u8; DRAW_LEN]) -> Option<f64>) -> Result<f64, Error> {
        for _ in 0..MAX_REDRAWS {
            let raw = self.raw_draw()?;

            if let Some(value) = derive(&raw) {
                return Ok(value);
            }

            log::trace!("discarded non-normalizable unit draw");
        }

        Err(self.redraws_exhausted())
    }

    /// A value in `[0, 1)` with 53 uniformly random mantissa bits.
    pub fn draw_unit_uniform(&self) -> Result<f64, Error> {
        let value = u64::from_le_bytes(self.raw_draw()?);

        Ok((value >> 11) as f64 * (1.0 / (1u64 << 53) as f64))
    }

    /// A value in `[0, max)` using the source's strategy.
    pub fn draw_bounded(&self, max: u64) -> Result<u64, Error> {
        match self.strategy {
            BoundedStrategy::Modulo => self.draw_bounded_modulo(max),
            BoundedStrategy::Rejection => self.draw_bounded_unbiased(max),
        }
    }

    /// `u64 % max`.
    pub fn draw_bounded_modulo(&self, max: u64) -> Result<u64, Error> {
        if max == 0 {
            return Err(ArgumentError::InvalidBound.into());
        }

        Ok(u64::from_le_bytes(self.raw_draw()?) % max)
    }

    /// Rejection sampling over the largest multiple of `max` that fits in
    /// a `u64`.
    pub fn draw_bounded_unbiased(&self, max: u64) -> Result<u64, Error> {
        if max == 0 {
            return Err(ArgumentError::InvalidBound.into());
        }

        let zone = u64::MAX - (u64::MAX - max + 1) % max;

        for _ in 0..MAX_REDRAWS {
            let value = u64::from_le_bytes(self.raw_draw()?);

            if value <= zone {
                return Ok(value % max);
            }

            log::trace!("rejected bounded draw outside the unbiased zone");
        }

        Err(self.redraws_exhausted())
    }
}

impl RandomDraw for RandomSource<'_> {
    fn draw_unit(&self) -> Result<f64, Error> {
        RandomSource::draw_unit(self)
    }

    fn draw_bounded(&self, max: u64) -> Result<u64, Error> {
        RandomSource::draw_bounded(self, max)
    }
}

fn magnitude(raw: &[u8; DRAW_LEN]) -> Option<f32> {
    let magnitude = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]).abs();

    magnitude.is_finite().then_some(magnitude)
}

fn compatible_unit(raw: &[u8; DRAW_LEN]) -> Option<f64> {
    magnitude(raw).map(|m| f64::from(m) / f64::MAX)
}

fn single_unit(raw: &[u8; DRAW_LEN]) -> Option<f64> {
    magnitude(raw)
        .filter(|&m| m < f32::MAX)
        .map(|m| f64::from(m) / f64::from(f32::MAX))
}
