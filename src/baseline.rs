//! Linear reference scan.
//!
//! Used as the ground truth for correctness checks. It is deliberately
//! the plainest possible loop and is not tuned.

use crate::error::Result;
use crate::matrix::MatrixView;
use crate::tournament::Selection;
use crate::traits::{BestRowStrategy, Method};

/// Busiest row of `view` by a single left-to-right pass.
///
/// The running best starts at `(0, 0)` and is only replaced on a strictly
/// larger count, so ties (including an all-zero matrix) resolve to the
/// earliest row.
pub fn sequential_best_row(view: MatrixView<'_>) -> Result<Selection> {
    view.ensure_non_empty()?;

    let mut best = Selection::new(0, 0);
    for i in 0..view.rows() {
        let count = view.row_sum(i);
        if count > best.value {
            best = Selection::new(i, count);
        }
    }
    Ok(best)
}

/// [`BestRowStrategy`] wrapper around [`sequential_best_row`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl BestRowStrategy for Sequential {
    fn method(&self) -> Method {
        Method::Sequential
    }

    fn best_row(&self, view: MatrixView<'_>) -> Result<Selection> {
        sequential_best_row(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::OccupancyMatrix;

    #[test]
    fn picks_busiest_row() {
        let m = OccupancyMatrix::from_rows([[0u8, 1, 0], [1, 1, 0], [1, 0, 1]]).unwrap();
        assert_eq!(sequential_best_row(m.view()).unwrap(), Selection::new(1, 2));
    }

    #[test]
    fn all_zero_matrix_reports_first_row() {
        let m = OccupancyMatrix::from_flat(5, 1, vec![0; 5]).unwrap();
        assert_eq!(sequential_best_row(m.view()).unwrap(), Selection::new(0, 0));
    }

    #[test]
    fn respects_view_columns() {
        let m = OccupancyMatrix::from_rows([[1u8, 0, 0, 0], [0, 1, 1, 1]]).unwrap();
        assert_eq!(
            Sequential.best_row(m.prefix(1).unwrap()).unwrap(),
            Selection::new(0, 1)
        );
        assert_eq!(Sequential.best_row(m.view()).unwrap(), Selection::new(1, 3));
    }
}
