//! The strategy seam between the algorithms and the benchmark harness.
//!
//! Anything that can answer "which row has the most occupied slots" for a
//! [`MatrixView`] implements [`BestRowStrategy`]. The harness never looks
//! past this trait: it warms a strategy up, times it, and compares its
//! answers against another strategy's.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::MatrixView;
use crate::tournament::Selection;

/// Method identifiers used in timing labels and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Linear left-to-right scan.
    Sequential,
    /// Recursive reducer followed by a tournament.
    #[serde(rename = "dac")]
    DivideAndConquer,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Sequential => "sequential",
            Method::DivideAndConquer => "dac",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A way of finding the busiest row.
///
/// Implementations must be pure functions of the view: the same view always
/// yields the same [`Selection`], and the reported index is the first row
/// reaching the maximum count.
pub trait BestRowStrategy {
    /// Which method this is.
    fn method(&self) -> Method;

    /// Index and count of the busiest row in `view`.
    fn best_row(&self, view: MatrixView<'_>) -> Result<Selection>;
}
