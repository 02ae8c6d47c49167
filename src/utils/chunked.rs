//! Growable array with fixed-chunk growth and fallible allocation

use crate::error::{IndexError, Result};
use std::ops::{Deref, DerefMut};

/// Default growth step, in elements
pub const DEFAULT_CHUNK: usize = 65536;

/// An owned buffer that grows `chunk` elements at a time
///
/// Growth goes through `try_reserve_exact`, so running out of memory is
/// reported as [`IndexError::Allocation`] instead of aborting.
#[derive(Debug, Clone)]
pub struct ChunkedVec<T> {
    items: Vec<T>,
    chunk: usize,
}

impl<T> ChunkedVec<T> {
    /// Create an empty array growing by `chunk` elements
    pub fn new(chunk: usize) -> Self {
        Self {
            items: Vec::new(),
            chunk: chunk.max(1),
        }
    }

    /// Append a value, growing by one chunk when full
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            self.grow(self.chunk)?;
        }
        self.items.push(value);
        Ok(())
    }

    /// Make room for at least `additional` more elements, rounded up to whole chunks
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let free = self.items.capacity() - self.items.len();
        if additional <= free {
            return Ok(());
        }
        let chunks = (additional - free).div_ceil(self.chunk);
        self.grow(chunks.saturating_mul(self.chunk))
    }

    fn grow(&mut self, elements: usize) -> Result<()> {
        self.items
            .try_reserve_exact(elements)
            .map_err(|_| IndexError::allocation::<T>(self.items.capacity() + elements))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// Drop every element, keeping the allocation
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Copy> ChunkedVec<T> {
    /// Append a whole slice, reserving once up front
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.reserve(values.len())?;
        self.items.extend_from_slice(values);
        Ok(())
    }
}

impl<T> Default for ChunkedVec<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK)
    }
}

impl<T> Deref for ChunkedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for ChunkedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}
