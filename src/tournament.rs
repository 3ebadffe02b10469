//! Divide-and-conquer argmax ("tournament selection").
//!
//! The index range is halved recursively; each leaf is a single candidate and
//! every internal node plays its two sub-winners against each other. A strictly
//! larger count wins outright, equal counts go to the smaller index. Because
//! the tie rule is a total order on `(value desc, index asc)`, the overall
//! winner is always the first occurrence of the maximum, exactly what a
//! left-to-right scan that only updates on strict improvement reports,
//! whatever shape the recursion takes.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::join;
use serde::{Deserialize, Serialize};

use crate::blocks::Span;
use crate::error::{OccError, Result};

/// Best row found by a strategy: its index and its number of occupied slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "best_row")]
    pub index: usize,
    #[serde(rename = "ones")]
    pub value: u64,
}

impl Selection {
    #[inline]
    pub fn new(index: usize, value: u64) -> Self {
        Self { index, value }
    }

    /// Play one match: the larger value wins, ties go to the smaller index.
    ///
    /// The result does not depend on argument order.
    #[inline]
    pub fn winner(left: Selection, right: Selection) -> Selection {
        match left.value.cmp(&right.value) {
            Ordering::Greater => left,
            Ordering::Less => right,
            Ordering::Equal => {
                if left.index < right.index {
                    left
                } else {
                    right
                }
            }
        }
    }
}

/// Maximum of `counts` over `range`, earliest index on ties.
///
/// Fails with [`OccError::InvalidRange`] when the range is empty or does not
/// fit inside `counts`.
pub fn select_max(counts: &[u64], range: Span) -> Result<Selection> {
    if range.is_empty() || range.end > counts.len() {
        return Err(OccError::InvalidRange {
            start: range.start,
            end: range.end,
            len: counts.len(),
        });
    }
    Ok(tournament(counts, range))
}

/// [`select_max`] over the whole sequence.
pub fn argmax(counts: &[u64]) -> Result<Selection> {
    select_max(counts, Span::full(counts.len()))
}

fn tournament(counts: &[u64], range: Span) -> Selection {
    #[cfg(feature = "trace-recursion")]
    let _guard =
        tracing::trace_span!("tournament", start = range.start, end = range.end).entered();

    if range.len() == 1 {
        return Selection::new(range.start, counts[range.start]);
    }

    let (left, right) = range.split();
    let (left_best, right_best) = play_halves(counts, left, right);
    Selection::winner(left_best, right_best)
}

#[cfg(feature = "parallel")]
fn play_halves(counts: &[u64], left: Span, right: Span) -> (Selection, Selection) {
    join(|| tournament(counts, left), || tournament(counts, right))
}

#[cfg(not(feature = "parallel"))]
fn play_halves(counts: &[u64], left: Span, right: Span) -> (Selection, Selection) {
    (tournament(counts, left), tournament(counts, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_maximum_wins_ties() {
        assert_eq!(argmax(&[3, 5, 5, 2]).unwrap(), Selection::new(1, 5));
        assert_eq!(argmax(&[7, 7, 7, 7, 7]).unwrap(), Selection::new(0, 7));
        assert_eq!(argmax(&[0, 1, 0, 1]).unwrap(), Selection::new(1, 1));
    }

    #[test]
    fn single_element_is_base_case() {
        assert_eq!(argmax(&[4]).unwrap(), Selection::new(0, 4));
        assert_eq!(
            select_max(&[1, 9, 2], Span::new(2, 3)).unwrap(),
            Selection::new(2, 2)
        );
    }

    #[test]
    fn sub_range_reports_absolute_index() {
        let counts = [9, 1, 4, 4, 3, 9];
        assert_eq!(
            select_max(&counts, Span::new(1, 5)).unwrap(),
            Selection::new(2, 4)
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(matches!(
            argmax(&[]),
            Err(OccError::InvalidRange { start: 0, end: 0, len: 0 })
        ));
        assert!(matches!(
            select_max(&[1, 2, 3], Span::new(2, 2)),
            Err(OccError::InvalidRange { .. })
        ));
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        assert!(matches!(
            select_max(&[1, 2, 3], Span::new(1, 4)),
            Err(OccError::InvalidRange { start: 1, end: 4, len: 3 })
        ));
    }

    #[test]
    fn winner_is_order_independent() {
        let a = Selection::new(3, 5);
        let b = Selection::new(1, 5);
        let c = Selection::new(0, 2);
        assert_eq!(Selection::winner(a, b), b);
        assert_eq!(Selection::winner(b, a), b);
        assert_eq!(Selection::winner(a, c), a);
        assert_eq!(Selection::winner(c, a), a);
    }
}
