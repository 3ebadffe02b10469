//! Benchmark harness comparing the linear scan against the divide-and-conquer
//! pipeline.
//!
//! A run has three phases:
//! 1. **Correctness check**: both strategies answer once on the full matrix;
//!    any disagreement is kept as a [`HarnessWarning::Mismatch`].
//! 2. **Full-matrix timing**: each strategy gets one untimed warm-up call and
//!    then `full_runs` timed repetitions.
//! 3. **Scaling experiment**: the same timing protocol on column prefixes
//!    whose widths come from [`width_checkpoints`]. The warm-up answers of
//!    both strategies are compared at every width.
//!
//! Every timed repetition is pushed into the caller's [`TimingSink`].
//! Disagreements never abort the run; they are surfaced in
//! [`BenchmarkReport::warnings`] and logged at `warn` level.

use std::fmt;
use std::hint::black_box;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::baseline::Sequential;
use crate::config::HarnessConfig;
use crate::engine::DivideAndConquer;
use crate::error::{OccError, Result};
use crate::matrix::{MatrixSummary, MatrixView, OccupancyMatrix};
use crate::sink::{TimingSample, TimingSink};
use crate::tournament::Selection;
use crate::traits::{BestRowStrategy, Method};
use crate::utils::{width_checkpoints, TimingStats};

/// Which part of the run a timing belongs to; decides the label suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Full,
    Scale,
}

impl Phase {
    fn suffix(self) -> &'static str {
        match self {
            Phase::Full => "full",
            Phase::Scale => "T",
        }
    }
}

/// Timing label such as `sequential_full` or `dac_T`.
pub fn timing_label(method: Method, phase: Phase) -> String {
    format!("{}_{}", method.as_str(), phase.suffix())
}

/// Outcome of timing one strategy on one view.
#[derive(Debug, Clone)]
pub struct TimedRun {
    /// Answer returned by the warm-up call.
    pub selection: Selection,
    /// Elapsed seconds of each timed repetition, in order.
    pub times: Vec<f64>,
    pub stats: TimingStats,
}

/// Warm `strategy` up once, then time `n_runs` repetitions on `view`.
///
/// The warm-up result is returned as the run's answer and is not timed.
/// Each repetition is measured on its own with a monotonic clock.
pub fn time_method<S>(strategy: &S, view: MatrixView<'_>, n_runs: usize) -> Result<TimedRun>
where
    S: BestRowStrategy + ?Sized,
{
    if n_runs == 0 {
        return Err(OccError::InvalidConfig {
            reason: "at least one timed repetition is required".to_string(),
        });
    }

    let selection = strategy.best_row(view)?;

    let mut times = Vec::with_capacity(n_runs);
    for _ in 0..n_runs {
        let start = Instant::now();
        let answer = strategy.best_row(view)?;
        let elapsed = start.elapsed();
        black_box(answer);
        times.push(elapsed.as_secs_f64());
    }

    let stats = TimingStats::from_samples(&times).ok_or_else(|| OccError::InvalidConfig {
        reason: "no timing samples collected".to_string(),
    })?;
    Ok(TimedRun {
        selection,
        times,
        stats,
    })
}

/// `(R, T)` of the benchmarked matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    #[serde(rename = "R")]
    pub rows: usize,
    #[serde(rename = "T")]
    pub cols: usize,
}

/// Both strategies' answers on the same view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrectnessCheck {
    pub sequential: Selection,
    pub dac: Selection,
    pub equal: bool,
}

impl CorrectnessCheck {
    pub fn new(sequential: Selection, dac: Selection) -> Self {
        Self {
            sequential,
            dac,
            equal: sequential == dac,
        }
    }

    /// Warning for this check at column width `width`, if the answers differ.
    pub fn mismatch(&self, width: usize) -> Option<HarnessWarning> {
        (!self.equal).then_some(HarnessWarning::Mismatch {
            width,
            sequential: self.sequential,
            dac: self.dac,
        })
    }
}

/// Non-fatal conditions observed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HarnessWarning {
    /// The two strategies disagreed on a view `width` columns wide.
    Mismatch {
        width: usize,
        sequential: Selection,
        dac: Selection,
    },
}

impl fmt::Display for HarnessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessWarning::Mismatch {
                width,
                sequential,
                dac,
            } => write!(
                f,
                "strategies disagree at T={width}: sequential=({}, {}) dac=({}, {})",
                sequential.index, sequential.value, dac.index, dac.value
            ),
        }
    }
}

/// Mean/std per method on the full matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FullMatrixTiming {
    pub n_runs: usize,
    pub sequential: TimingStats,
    pub dac: TimingStats,
}

/// Mean/std per method at one checkpoint width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalePoint {
    pub width: usize,
    pub sequential: TimingStats,
    pub dac: TimingStats,
    /// Whether both warm-up answers matched at this width.
    pub agree: bool,
}

/// Runtime-versus-width measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleExperiment {
    pub n_runs: usize,
    pub widths: Vec<usize>,
    pub points: Vec<ScalePoint>,
}

impl ScaleExperiment {
    /// `(width, mean, std)` triples for one method, in width order.
    pub fn series(&self, method: Method) -> Vec<(usize, f64, f64)> {
        self.points
            .iter()
            .map(|p| {
                let s = match method {
                    Method::Sequential => p.sequential,
                    Method::DivideAndConquer => p.dac,
                };
                (p.width, s.mean, s.std)
            })
            .collect()
    }
}

/// Everything a benchmark run produces apart from the raw samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub shape: Shape,
    pub summary: MatrixSummary,
    pub config: HarnessConfig,
    pub correctness: CorrectnessCheck,
    pub full_matrix_timing: FullMatrixTiming,
    pub scale_experiment: ScaleExperiment,
    /// One entry per distinct disagreement. The last checkpoint spans the
    /// full matrix, so a full-matrix mismatch is reported once, not again
    /// for that checkpoint.
    pub warnings: Vec<HarnessWarning>,
}

impl BenchmarkReport {
    pub fn has_mismatch(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Serialise as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Runs the correctness check, full-matrix timing and scaling experiment.
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Fails with [`OccError::InvalidConfig`] if `config` cannot produce
    /// measurements.
    pub fn new(config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Load the matrix at `path` and [`run`](Self::run) on it.
    ///
    /// An absent file is fatal ([`OccError::MissingInput`]); nothing is timed.
    pub fn run_from_path(
        &self,
        path: impl AsRef<Path>,
        sink: &mut dyn TimingSink,
    ) -> Result<BenchmarkReport> {
        let matrix = OccupancyMatrix::from_csv_path(path)?;
        self.run(&matrix, sink)
    }

    /// Full benchmark on `matrix` with the linear scan as the oracle and the
    /// divide-and-conquer pipeline as the candidate.
    pub fn run(
        &self,
        matrix: &OccupancyMatrix,
        sink: &mut dyn TimingSink,
    ) -> Result<BenchmarkReport> {
        self.run_with(&Sequential, &DivideAndConquer, matrix, sink)
    }

    /// Full benchmark comparing `candidate` against `oracle`.
    ///
    /// Samples are labelled with each strategy's [`Method`].
    pub fn run_with(
        &self,
        oracle: &dyn BestRowStrategy,
        candidate: &dyn BestRowStrategy,
        matrix: &OccupancyMatrix,
        sink: &mut dyn TimingSink,
    ) -> Result<BenchmarkReport> {
        let (rows, cols) = matrix.shape();
        let span = info_span!("benchmark", rows, cols);
        let _enter = span.enter();
        info!(rows, cols, "starting experiment");

        let mut warnings = Vec::new();

        let correctness = correctness_check(oracle, candidate, matrix.view())?;
        warnings.extend(correctness.mismatch(cols));

        let full_matrix_timing = self.full_matrix_timing(oracle, candidate, matrix, sink)?;
        let scale_experiment =
            self.scale_experiment(oracle, candidate, matrix, sink, &mut warnings)?;
        sink.flush()?;

        Ok(BenchmarkReport {
            shape: Shape { rows, cols },
            summary: matrix.summary(),
            config: self.config,
            correctness,
            full_matrix_timing,
            scale_experiment,
            warnings,
        })
    }

    /// Answer once with each built-in strategy and compare.
    pub fn correctness_check(&self, view: MatrixView<'_>) -> Result<CorrectnessCheck> {
        correctness_check(&Sequential, &DivideAndConquer, view)
    }

    /// Time both strategies on the whole matrix.
    pub fn full_matrix_timing(
        &self,
        oracle: &dyn BestRowStrategy,
        candidate: &dyn BestRowStrategy,
        matrix: &OccupancyMatrix,
        sink: &mut dyn TimingSink,
    ) -> Result<FullMatrixTiming> {
        let n_runs = self.config.full_runs;
        let view = matrix.view();
        info!(rows = view.rows(), cols = view.cols(), n_runs, "full matrix timing");

        let seq = time_method(oracle, view, n_runs)?;
        let dac = time_method(candidate, view, n_runs)?;
        record(sink, oracle.method(), Phase::Full, view, &seq.times)?;
        record(sink, candidate.method(), Phase::Full, view, &dac.times)?;

        log_stats(view.cols(), &seq, &dac);
        Ok(FullMatrixTiming {
            n_runs,
            sequential: seq.stats,
            dac: dac.stats,
        })
    }

    /// Time both strategies on each checkpoint prefix.
    ///
    /// Disagreements between the warm-up answers are appended to `warnings`
    /// unless an identical warning is already there.
    pub fn scale_experiment(
        &self,
        oracle: &dyn BestRowStrategy,
        candidate: &dyn BestRowStrategy,
        matrix: &OccupancyMatrix,
        sink: &mut dyn TimingSink,
        warnings: &mut Vec<HarnessWarning>,
    ) -> Result<ScaleExperiment> {
        let n_runs = self.config.scale_runs;
        let widths = width_checkpoints(matrix.cols(), self.config.checkpoints);
        info!(rows = matrix.rows(), ?widths, n_runs, "scale experiment");

        let mut points = Vec::with_capacity(widths.len());
        for &width in &widths {
            let span = info_span!("checkpoint", width);
            let _enter = span.enter();

            let view = matrix.prefix(width)?;
            let seq = time_method(oracle, view, n_runs)?;
            let dac = time_method(candidate, view, n_runs)?;
            record(sink, oracle.method(), Phase::Scale, view, &seq.times)?;
            record(sink, candidate.method(), Phase::Scale, view, &dac.times)?;
            log_stats(width, &seq, &dac);

            let check = CorrectnessCheck::new(seq.selection, dac.selection);
            if let Some(warning) = check.mismatch(width) {
                if !warnings.contains(&warning) {
                    warn!(%warning, "checkpoint disagreement");
                    warnings.push(warning);
                }
            }

            points.push(ScalePoint {
                width,
                sequential: seq.stats,
                dac: dac.stats,
                agree: check.equal,
            });
        }

        Ok(ScaleExperiment {
            n_runs,
            widths,
            points,
        })
    }
}

/// Answer once with `oracle` and `candidate` on `view` and compare.
pub fn correctness_check(
    oracle: &dyn BestRowStrategy,
    candidate: &dyn BestRowStrategy,
    view: MatrixView<'_>,
) -> Result<CorrectnessCheck> {
    let check = CorrectnessCheck::new(oracle.best_row(view)?, candidate.best_row(view)?);
    info!(
        sequential_row = check.sequential.index,
        sequential_ones = check.sequential.value,
        dac_row = check.dac.index,
        dac_ones = check.dac.value,
        "correctness check"
    );
    if !check.equal {
        warn!(
            width = view.cols(),
            "sequential and divide-and-conquer results differ"
        );
    }
    Ok(check)
}

fn record(
    sink: &mut dyn TimingSink,
    method: Method,
    phase: Phase,
    view: MatrixView<'_>,
    times: &[f64],
) -> Result<()> {
    let label = timing_label(method, phase);
    for (idx, &seconds) in times.iter().enumerate() {
        sink.record(&TimingSample {
            method: label.clone(),
            rows: view.rows(),
            cols: view.cols(),
            repeat: idx + 1,
            seconds,
        })?;
    }
    Ok(())
}

fn log_stats(width: usize, seq: &TimedRun, dac: &TimedRun) {
    debug!(
        width,
        sequential_mean = seq.stats.mean,
        sequential_std = seq.stats.std,
        dac_mean = dac.stats.mean,
        dac_std = dac.stats.std,
        "timing stats"
    );
}
