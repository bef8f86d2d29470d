//! `OctetView` - a bounds-checked, forward-only view over a byte slice.
//!
//! Every read advances the cursor by exactly the number of bytes it returns and
//! fails with [`OctetViewError`] instead of panicking when the slice is
//! exhausted. Views created with [`OctetView::sub_view`] keep track of their
//! absolute position in the outermost buffer, so byte ranges reported by a
//! nested decoder can be mapped straight back onto the original capture.

use std::cell::Cell;
use std::ops::Range;

use thiserror::Error;

/// Errors returned by [`OctetView`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OctetViewError {
    /// Not enough bytes left for the requested read
    #[error("Buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Bytes requested
        expected: usize,
        /// Bytes remaining
        actual: usize,
    },
}

/// A read-only view over a byte slice for sequential parsing.
///
/// # Example
/// ```
/// use epsnas_common::OctetView;
///
/// let data = [0x12, 0x34, 0x56, 0x78];
/// let view = OctetView::new(&data);
///
/// assert_eq!(view.read().unwrap(), 0x12);
/// assert_eq!(view.read_u16().unwrap(), 0x3456);
/// assert_eq!(view.read().unwrap(), 0x78);
/// assert!(!view.has_next());
/// assert!(view.read().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OctetView<'a> {
    data: &'a [u8],
    index: Cell<usize>,
    base: usize,
}

impl<'a> OctetView<'a> {
    /// Creates a new `OctetView` whose first byte is at absolute offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Creates a new `OctetView` whose first byte is at absolute offset `base`.
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            index: Cell::new(0),
            base,
        }
    }

    // --- Peek methods (don't advance index) ---

    /// Peeks at the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.index.get()).copied()
    }

    /// Peeks at the byte `offset` positions after the current one.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.index.get() + offset).copied()
    }

    // --- Read methods (advance index) ---

    fn ensure(&self, count: usize) -> Result<(), OctetViewError> {
        let remaining = self.remaining();
        if remaining < count {
            return Err(OctetViewError::BufferTooShort {
                expected: count,
                actual: remaining,
            });
        }
        Ok(())
    }

    /// Reads a single byte.
    #[inline]
    pub fn read(&self) -> Result<u8, OctetViewError> {
        self.ensure(1)?;
        let idx = self.index.get();
        self.index.set(idx + 1);
        Ok(self.data[idx])
    }

    /// Reads a 16-bit value in big-endian order.
    #[inline]
    pub fn read_u16(&self) -> Result<u16, OctetViewError> {
        let [b0, b1] = self.read_array::<2>()?;
        Ok(u16::from_be_bytes([b0, b1]))
    }

    /// Reads a 24-bit value in big-endian order.
    #[inline]
    pub fn read_u24(&self) -> Result<u32, OctetViewError> {
        let [b0, b1, b2] = self.read_array::<3>()?;
        Ok(u32::from_be_bytes([0, b0, b1, b2]))
    }

    /// Reads a 32-bit value in big-endian order.
    #[inline]
    pub fn read_u32(&self) -> Result<u32, OctetViewError> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&self) -> Result<[u8; N], OctetViewError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Reads `length` bytes, borrowing them from the underlying slice.
    pub fn read_slice(&self, length: usize) -> Result<&'a [u8], OctetViewError> {
        self.ensure(length)?;
        let idx = self.index.get();
        self.index.set(idx + length);
        Ok(&self.data[idx..idx + length])
    }

    /// Consumes all remaining bytes.
    pub fn read_remaining(&self) -> &'a [u8] {
        let idx = self.index.get().min(self.data.len());
        self.index.set(self.data.len());
        &self.data[idx..]
    }

    /// Consumes `length` bytes and returns them as a new view positioned at
    /// their absolute offset.
    pub fn sub_view(&self, length: usize) -> Result<OctetView<'a>, OctetViewError> {
        let start = self.position();
        let slice = self.read_slice(length)?;
        Ok(OctetView::with_base(slice, start))
    }

    /// Skips the specified number of bytes.
    pub fn skip(&self, count: usize) -> Result<(), OctetViewError> {
        self.read_slice(count).map(|_| ())
    }

    // --- Position and state methods ---

    /// Returns the read index relative to the start of this view.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index.get()
    }

    /// Returns the absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.base + self.index.get()
    }

    /// Returns the absolute offset of the first byte of this view.
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the absolute offset one past the last byte of this view.
    #[inline]
    pub fn end(&self) -> usize {
        self.base + self.data.len()
    }

    /// Absolute range covering everything not yet consumed.
    #[inline]
    pub fn remaining_range(&self) -> Range<usize> {
        self.position()..self.end()
    }

    /// Returns the total length of the underlying data.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying data is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes remaining to be read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.index.get())
    }

    /// Returns true if there are more bytes to read.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.index.get() < self.data.len()
    }

    /// Returns the whole underlying slice.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns a slice of the remaining unread data.
    #[inline]
    pub fn remaining_data(&self) -> &'a [u8] {
        &self.data[self.index.get().min(self.data.len())..]
    }
}

impl<'a> From<&'a [u8]> for OctetView<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
