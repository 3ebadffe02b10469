//! Busiest-resource queries over binary occupancy matrices.
//!
//! An occupancy matrix has one row per resource (for example a loading dock)
//! and one column per discretised time slot; a `1` marks the resource as busy
//! during that slot. This crate answers one question, *which row has the most
//! occupied slots?*, in two ways and measures both:
//!
//! - a linear baseline scan ([`sequential_best_row`]), used as the oracle;
//! - a divide-and-conquer pipeline ([`dac_best_row`]) that reduces row sums by
//!   recursive column halving and then picks the winner with a recursive
//!   tournament.
//!
//! Both report the *first* row reaching the maximum, so their answers are
//! identical for every input.
//!
//! ## Quick start
//! ```
//! use occ_dac::{dac_best_row, sequential_best_row, OccupancyMatrix, Selection};
//!
//! let m = OccupancyMatrix::from_csv_reader("1,0,1\n1,1,0\n0,0,1\n".as_bytes()).unwrap();
//! let best = dac_best_row(m.view()).unwrap();
//! assert_eq!(best, Selection::new(0, 2));
//! assert_eq!(best, sequential_best_row(m.view()).unwrap());
//! ```
//!
//! ## Benchmarking
//! [`Harness`] runs a correctness check, times both strategies on the full
//! matrix and on a sequence of column prefixes, and returns a
//! [`BenchmarkReport`]. Individual repetitions go to a [`sink::TimingSink`].
//!
//! ## Features
//! - `parallel`: evaluate the two halves of each recursion with `rayon::join`.
//! - `trace-recursion`: emit a `trace` span per recursive call.
//! - `heavy`: enable long-running stress tests.

pub mod baseline;
pub mod blocks;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod matrix;
pub mod reduce;
pub mod sink;
pub mod tournament;
pub mod traits;
pub mod utils;

pub use crate::baseline::{sequential_best_row, Sequential};
pub use crate::builder::HarnessBuilder;
pub use crate::config::HarnessConfig;
pub use crate::engine::{dac_best_row, DivideAndConquer};
pub use crate::error::{OccError, Result};
pub use crate::harness::{BenchmarkReport, Harness};
pub use crate::matrix::{MatrixView, OccupancyMatrix};
pub use crate::tournament::Selection;
pub use crate::traits::{BestRowStrategy, Method};
