//! Uniform sampling from collections.
//!
//! A [`Randomizer`] picks elements with replacement from anything that is
//! [`Indexable`]: each pick draws an index in `[0, size)` from a
//! [`RandomDraw`] source, so the same element may come up more than once.
//!
//! ```
//! use randomizer::RandomContext;
//!
//! # fn main() -> Result<(), randomizer::Error> {
//! let context = RandomContext::new();
//! let letters = ["a", "b", "c", "d"];
//!
//! let one = context.randomizer().pick_one_from(&letters)?;
//! let five = context.randomizer().pick_count_from(&letters, 5)?;
//!
//! assert!(letters.contains(one));
//! assert_eq!(five.len(), 5);
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;

use crate::error::{ArgumentError, Error, TypeError};
use crate::source::RandomDraw;

/// A sized collection with positional access.
pub trait Indexable {
    type Item;

    fn size(&self) -> usize;

    /// The element at `index`, or `None` if there is none.
    fn at(&self, index: usize) -> Option<&Self::Item>;
}

impl<T> Indexable for [T] {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T, const N: usize> Indexable for [T; N] {
    type Item = T;

    fn size(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> Indexable for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> Indexable for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// Samples elements with replacement.
pub struct Randomizer<S> {
    source: S,
}

impl<S: RandomDraw> Randomizer<S> {
    /// A sampler drawing indices from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The draw source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// One element of `collection`.
    pub fn pick_one_from<'c, C>(&self, collection: &'c C) -> Result<&'c C::Item, Error>
    where
        C: Indexable + ?Sized,
    {
        let size = non_empty_size(collection)?;

        self.pick(collection, size)
    }

    /// `count` independently drawn elements of `collection`, in draw order.
    ///
    /// An empty collection is an error even when `count` is zero.
    pub fn pick_count_from<'c, C>(
        &self,
        collection: &'c C,
        count: usize,
    ) -> Result<Vec<&'c C::Item>, Error>
    where
        C: Indexable + ?Sized,
    {
        let size = non_empty_size(collection)?;

        (0..count).map(|_| self.pick(collection, size)).collect()
    }

    fn pick<'c, C>(&self, collection: &'c C, size: usize) -> Result<&'c C::Item, Error>
    where
        C: Indexable + ?Sized,
    {
        let index = self.source.draw_bounded(size as u64)? as usize;

        collection
            .at(index)
            .ok_or(Error::Type(TypeError::UnsupportedCollection { index, size }))
    }
}

fn non_empty_size<C: Indexable + ?Sized>(collection: &C) -> Result<usize, ArgumentError> {
    match collection.size() {
        0 => Err(ArgumentError::EmptyCollection),
        size => Ok(size),
    }
}
