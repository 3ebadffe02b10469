//! Divide-and-conquer busiest-row pipeline.
//!
//! Two recursive phases:
//! 1. [`row_counts`] halves the view along the time axis and adds partial row
//!    sums back together.
//! 2. [`argmax`] runs a tournament over the resulting counts.
//!
//! Typical usage:
//! ```
//! use occ_dac::{dac_best_row, OccupancyMatrix, Selection};
//!
//! let m = OccupancyMatrix::from_rows([[0u8, 1, 1], [1, 1, 1], [1, 1, 0]]).unwrap();
//! assert_eq!(dac_best_row(m.view()).unwrap(), Selection::new(1, 3));
//! ```

use crate::error::Result;
use crate::matrix::MatrixView;
use crate::reduce::row_counts;
use crate::tournament::{argmax, Selection};
use crate::traits::{BestRowStrategy, Method};

/// Busiest row of `view` via recursive reduction and tournament selection.
///
/// Always agrees with [`crate::baseline::sequential_best_row`] on both index
/// and value.
pub fn dac_best_row(view: MatrixView<'_>) -> Result<Selection> {
    let counts = row_counts(view)?;
    argmax(&counts)
}

/// [`BestRowStrategy`] wrapper around [`dac_best_row`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DivideAndConquer;

impl BestRowStrategy for DivideAndConquer {
    fn method(&self) -> Method {
        Method::DivideAndConquer
    }

    fn best_row(&self, view: MatrixView<'_>) -> Result<Selection> {
        dac_best_row(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::sequential_best_row;
    use crate::matrix::OccupancyMatrix;

    #[test]
    fn one_by_one_occupied() {
        let m = OccupancyMatrix::from_rows([[1u8]]).unwrap();
        assert_eq!(dac_best_row(m.view()).unwrap(), Selection::new(0, 1));
    }

    #[test]
    fn all_zero_column_first_row_wins() {
        let m = OccupancyMatrix::from_flat(5, 1, vec![0; 5]).unwrap();
        assert_eq!(dac_best_row(m.view()).unwrap(), Selection::new(0, 0));
    }

    #[test]
    fn tied_rows_resolve_to_earliest() {
        let m = OccupancyMatrix::from_rows([
            [1u8, 1, 1, 0, 0],
            [1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1],
            [0, 1, 0, 1, 0],
        ])
        .unwrap();
        let dac = DivideAndConquer.best_row(m.view()).unwrap();
        assert_eq!(dac, Selection::new(1, 5));
        assert_eq!(dac, sequential_best_row(m.view()).unwrap());
    }

    #[test]
    fn repeated_calls_are_stable() {
        let m = OccupancyMatrix::from_rows([[0u8, 1, 1, 0], [1, 0, 1, 1]]).unwrap();
        let first = dac_best_row(m.view()).unwrap();
        for _ in 0..10 {
            assert_eq!(dac_best_row(m.view()).unwrap(), first);
        }
    }
}
