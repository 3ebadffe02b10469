//! Binary occupancy matrices and borrowed column windows over them.
//!
//! Rows are resources (docks), columns are discretised time slots and a cell
//! is `1` when the resource is occupied during that slot. An
//! [`OccupancyMatrix`] is validated once on construction and never mutated
//! afterwards; every algorithm in the crate works on a [`MatrixView`], a
//! cheap `Copy` handle that restricts the matrix to a contiguous column range
//! without copying cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::blocks::Span;
use crate::error::{OccError, Result};

/// Validated `R x T` binary matrix stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

/// Shape and density figures for a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MatrixSummary {
    /// Number of resources `R`.
    pub rows: usize,
    /// Number of time slots `T`.
    pub cols: usize,
    /// Total number of occupied cells.
    pub ones: u64,
    /// `1 - ones / (R * T)`.
    pub sparsity: f64,
}

impl OccupancyMatrix {
    /// Build from row-major cells.
    ///
    /// Fails with [`OccError::InvalidInput`] when either dimension is zero,
    /// when `rows * cols` overflows, or when `cells.len() != rows * cols`, and
    /// with [`OccError::NonBinary`] on the first cell outside `{0, 1}`.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(OccError::invalid_input(format!(
                "matrix must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            OccError::invalid_input(format!("{rows}x{cols} matrix is too large to address"))
        })?;
        if cells.len() != expected {
            return Err(OccError::invalid_input(format!(
                "expected {expected} cells for a {rows}x{cols} matrix, got {}",
                cells.len()
            )));
        }
        if let Some(pos) = cells.iter().position(|&c| c > 1) {
            return Err(OccError::NonBinary {
                row: pos / cols,
                col: pos % cols,
                value: i64::from(cells[pos]),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build from nested rows, all of which must share the same length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut count = 0usize;
        for (idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(OccError::invalid_input(format!(
                        "row {idx} has {} columns, expected {w}",
                        row.len()
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(row);
            count += 1;
        }
        Self::from_flat(count, width.unwrap_or(0), cells)
    }

    /// Parse comma-delimited `0/1` integers, one row per line, no header.
    ///
    /// Surrounding whitespace is trimmed and blank lines are ignored. Every
    /// entry must be an integer in `{0, 1}`; anything else is a fatal
    /// validation failure.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut row = 0usize;
        for record in rdr.records() {
            let record = record?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            match width {
                None => width = Some(record.len()),
                Some(w) if w != record.len() => {
                    return Err(OccError::invalid_input(format!(
                        "row {row} has {} columns, expected {w}",
                        record.len()
                    )));
                }
                Some(_) => {}
            }
            for (col, raw) in record.iter().enumerate() {
                let value: i64 = raw.parse().map_err(|_| OccError::NonInteger {
                    row,
                    col,
                    raw: raw.to_string(),
                })?;
                match value {
                    0 | 1 => cells.push(value as u8),
                    _ => return Err(OccError::NonBinary { row, col, value }),
                }
            }
            row += 1;
        }

        Self::from_flat(row, width.unwrap_or(0), cells)
    }

    /// Load a persisted matrix file.
    ///
    /// An absent file is reported as [`OccError::MissingInput`] so callers can
    /// tell it apart from a malformed one.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OccError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(R, T)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Full row `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let base = row * self.cols;
        &self.cells[base..base + self.cols]
    }

    /// View over every column.
    #[inline]
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView {
            matrix: self,
            columns: Span::full(self.cols),
        }
    }

    /// View over the first `width` columns (all rows).
    pub fn prefix(&self, width: usize) -> Result<MatrixView<'_>> {
        if width == 0 || width > self.cols {
            return Err(OccError::invalid_input(format!(
                "prefix width {width} outside 1..={}",
                self.cols
            )));
        }
        Ok(MatrixView {
            matrix: self,
            columns: Span::new(0, width),
        })
    }

    pub fn summary(&self) -> MatrixSummary {
        let ones = self.cells.iter().map(|&c| u64::from(c)).sum::<u64>();
        let total = (self.rows * self.cols) as f64;
        MatrixSummary {
            rows: self.rows,
            cols: self.cols,
            ones,
            sparsity: 1.0 - ones as f64 / total,
        }
    }
}

/// Borrowed window over a contiguous column range of an [`OccupancyMatrix`].
#[derive(Clone, Copy, Debug)]
pub struct MatrixView<'a> {
    matrix: &'a OccupancyMatrix,
    columns: Span,
}

impl<'a> MatrixView<'a> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.matrix.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// `(R, width)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Column range of the underlying matrix covered by this view.
    #[inline]
    pub fn columns(&self) -> Span {
        self.columns
    }

    /// Row `row` restricted to the view's columns.
    #[inline]
    pub fn row(&self, row: usize) -> &'a [u8] {
        &self.matrix.row(row)[self.columns.start..self.columns.end]
    }

    /// Number of occupied slots of `row` inside the view.
    #[inline]
    pub fn row_sum(&self, row: usize) -> u64 {
        self.row(row).iter().map(|&c| u64::from(c)).sum()
    }

    /// Local column `col` as counts, one per row.
    pub fn column(&self, col: usize) -> Vec<u64> {
        let j = self.columns.start + col;
        debug_assert!(j < self.columns.end);
        (0..self.rows())
            .map(|i| u64::from(self.matrix.cells[i * self.matrix.cols + j]))
            .collect()
    }

    /// Split columns at `width / 2` into a left and a right view.
    ///
    /// Only meaningful for views at least two columns wide; both halves are
    /// then non-empty.
    #[inline]
    pub fn split(&self) -> (MatrixView<'a>, MatrixView<'a>) {
        let (left, right) = self.columns.split();
        (
            MatrixView {
                matrix: self.matrix,
                columns: left,
            },
            MatrixView {
                matrix: self.matrix,
                columns: right,
            },
        )
    }

    pub(crate) fn ensure_non_empty(&self) -> Result<()> {
        if self.rows() == 0 || self.cols() == 0 {
            return Err(OccError::invalid_input(format!(
                "view must be non-empty, got {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OccupancyMatrix {
        OccupancyMatrix::from_rows([[1u8, 0, 1, 1], [0, 0, 1, 0], [1, 1, 1, 1]]).unwrap()
    }

    #[test]
    fn shape_and_access() {
        let m = sample();
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.get(0, 2), 1);
        assert_eq!(m.get(1, 0), 0);
        assert_eq!(m.row(2), &[1, 1, 1, 1]);
    }

    #[test]
    fn rejects_empty_and_ragged() {
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(
            OccupancyMatrix::from_rows(empty),
            Err(OccError::InvalidInput { .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_rows([Vec::<u8>::new()]),
            Err(OccError::InvalidInput { .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_rows([vec![1u8, 0], vec![1]]),
            Err(OccError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(matches!(
            OccupancyMatrix::from_flat(usize::MAX, 2, vec![0, 1]),
            Err(OccError::InvalidInput { .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_flat(2, usize::MAX / 2 + 1, vec![0, 1]),
            Err(OccError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_non_binary_cell() {
        let err = OccupancyMatrix::from_flat(2, 2, vec![0, 1, 2, 0]).unwrap_err();
        match err {
            OccError::NonBinary { row, col, value } => {
                assert_eq!((row, col, value), (1, 0, 2))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn view_split_halves_columns() {
        let m = sample();
        let (left, right) = m.view().split();
        assert_eq!(left.columns(), Span::new(0, 2));
        assert_eq!(right.columns(), Span::new(2, 4));
        assert_eq!(left.row(0), &[1, 0]);
        assert_eq!(right.row(0), &[1, 1]);
        assert_eq!(right.column(0), vec![1, 1, 1]);
    }

    #[test]
    fn prefix_bounds() {
        let m = sample();
        assert_eq!(m.prefix(3).unwrap().cols(), 3);
        assert_eq!(m.prefix(4).unwrap().row_sum(0), 3);
        assert!(m.prefix(0).is_err());
        assert!(m.prefix(5).is_err());
    }

    #[test]
    fn summary_counts_ones() {
        let s = sample().summary();
        assert_eq!((s.rows, s.cols, s.ones), (3, 4, 8));
        assert!((s.sparsity - (1.0 - 8.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn csv_parses_trimmed_fields_and_skips_blank_lines() {
        let text = "1, 0,1\n\n0,0 ,0\n";
        let m = OccupancyMatrix::from_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(0), &[1, 0, 1]);
    }

    #[test]
    fn csv_single_line_is_one_row() {
        let m = OccupancyMatrix::from_csv_reader("0,1,1,0".as_bytes()).unwrap();
        assert_eq!(m.shape(), (1, 4));
    }

    #[test]
    fn csv_rejects_bad_entries() {
        assert!(matches!(
            OccupancyMatrix::from_csv_reader("1,-1\n".as_bytes()),
            Err(OccError::NonBinary { value: -1, .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_csv_reader("1,0.5\n".as_bytes()),
            Err(OccError::NonInteger { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_csv_reader("1,0\n1\n".as_bytes()),
            Err(OccError::InvalidInput { .. })
        ));
        assert!(matches!(
            OccupancyMatrix::from_csv_reader("".as_bytes()),
            Err(OccError::InvalidInput { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let err =
            OccupancyMatrix::from_csv_path("/definitely/not/here/occupancy.csv").unwrap_err();
        assert!(matches!(err, OccError::MissingInput { .. }));
    }
}
