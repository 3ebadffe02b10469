//! Half-open index ranges used by both recursions.
//!
//! The reducer splits a matrix along columns and the selector splits a count
//! sequence along rows; both describe the piece they work on as a [`Span`]
//! covering `[start, end)`.

use serde::{Deserialize, Serialize};

/// A contiguous half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start index.
    pub start: usize,
    /// Exclusive end index.
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering `[0, len)`.
    #[inline]
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Midpoint `start + len / 2`, equal to `(start + end) / 2`.
    #[inline]
    pub fn mid(&self) -> usize {
        self.start + self.len() / 2
    }

    /// Split at [`mid`](Self::mid) into `[start, mid)` and `[mid, end)`.
    ///
    /// For spans of length >= 2 both halves are non-empty and the left half is
    /// never longer than the right one.
    #[inline]
    pub fn split(&self) -> (Span, Span) {
        let mid = self.mid();
        (Span::new(self.start, mid), Span::new(mid, self.end))
    }
}
