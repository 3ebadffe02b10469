//! Divide-and-conquer row sums.
//!
//! A view one column wide is its own row-sum vector. Wider views are split at
//! `width / 2`, both halves are reduced, and the two length-`R` vectors are
//! added element-wise. Recursion depth is `O(log T)` and each level does
//! `O(R)` combine work per node, so the total is `O(R * T)`, the same as a
//! direct row-wise sum, with the recursion adding a constant-factor overhead.

#[cfg(feature = "parallel")]
use rayon::join;

use crate::error::Result;
use crate::matrix::MatrixView;

/// Occupied-slot count per row; element `i` belongs to row `i`.
pub type RowCounts = Vec<u64>;

/// Row sums of `view`, computed by recursive column halving.
///
/// Fails with [`crate::OccError::InvalidInput`] on a view with no rows or no
/// columns.
pub fn row_counts(view: MatrixView<'_>) -> Result<RowCounts> {
    view.ensure_non_empty()?;
    Ok(reduce(view))
}

fn reduce(view: MatrixView<'_>) -> RowCounts {
    #[cfg(feature = "trace-recursion")]
    let _guard = tracing::trace_span!(
        "reduce",
        start = view.columns().start,
        end = view.columns().end
    )
    .entered();

    if view.cols() == 1 {
        return view.column(0);
    }

    let (left, right) = view.split();
    let (mut acc, right_counts) = reduce_halves(left, right);
    for (a, b) in acc.iter_mut().zip(&right_counts) {
        *a += *b;
    }
    acc
}

#[cfg(feature = "parallel")]
fn reduce_halves(left: MatrixView<'_>, right: MatrixView<'_>) -> (RowCounts, RowCounts) {
    join(|| reduce(left), || reduce(right))
}

#[cfg(not(feature = "parallel"))]
fn reduce_halves(left: MatrixView<'_>, right: MatrixView<'_>) -> (RowCounts, RowCounts) {
    (reduce(left), reduce(right))
}
