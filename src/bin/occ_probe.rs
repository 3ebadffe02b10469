use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use occ_dac::harness::{BenchmarkReport, CorrectnessCheck};
use occ_dac::sink::{CsvTimingSink, DiscardSink, TimingSink};
use occ_dac::{HarnessBuilder, HarnessConfig, OccError, OccupancyMatrix};
use serde::Serialize;
use sysinfo::{get_current_pid, System};
use tracing_subscriber::EnvFilter;

/// Exit code when `--strict` is set and the strategies disagree.
const MISMATCH_EXIT: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "occ_probe",
    about = "Compare sequential and divide-and-conquer busiest-row search on an occupancy matrix"
)]
struct Options {
    /// Occupancy matrix CSV: 0/1 integers, comma-delimited, one row per
    /// resource, no header.
    #[arg(long)]
    input: PathBuf,

    /// Per-repetition timing log (method,R,T,repeat,seconds).
    #[arg(long)]
    timings: Option<PathBuf>,

    /// Append to the timing log instead of starting a fresh one.
    #[arg(long, requires = "timings")]
    append: bool,

    /// Write the structured benchmark report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Timed repetitions per method on the full matrix.
    #[arg(long, default_value_t = 20)]
    full_runs: usize,

    /// Timed repetitions per method at each scaling checkpoint.
    #[arg(long, default_value_t = 10)]
    scale_runs: usize,

    /// Number of column-width checkpoints (0 skips the scaling experiment).
    #[arg(long, default_value_t = 6)]
    checkpoints: usize,

    /// Output format for the scaling table on stdout.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Only compare the two strategies once; no timing.
    #[arg(long)]
    check_only: bool,

    /// Exit with a non-zero status if the strategies ever disagree.
    #[arg(long)]
    strict: bool,
}

impl Options {
    fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            full_runs: self.full_runs,
            scale_runs: self.scale_runs,
            checkpoints: self.checkpoints,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

#[derive(Serialize)]
struct ScaleRow {
    width: usize,
    sequential_mean: f64,
    sequential_std: f64,
    dac_mean: f64,
    dac_std: f64,
    agree: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();
    match run(&options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("occ_probe: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<ExitCode, OccError> {
    let matrix = OccupancyMatrix::from_csv_path(&options.input)?;
    let harness = HarnessBuilder::with_config(options.harness_config()).build()?;
    let config = harness.config();
    tracing::info!(
        full_runs = config.full_runs,
        scale_runs = config.scale_runs,
        checkpoints = config.checkpoints,
        "harness configured"
    );

    if options.check_only {
        let check = harness.correctness_check(matrix.view())?;
        print_check(&check);
        return Ok(exit_code(options.strict && !check.equal));
    }

    let mut sink: Box<dyn TimingSink> = match &options.timings {
        Some(path) if options.append => Box::new(CsvTimingSink::append(path)?),
        Some(path) => Box::new(CsvTimingSink::create(path)?),
        None => Box::new(DiscardSink),
    };

    let mut sys = System::new();
    let before = rss_kib(&mut sys);
    let report = harness.run(&matrix, sink.as_mut())?;
    let after = rss_kib(&mut sys);

    if let Some(path) = &options.report {
        let file = BufWriter::new(File::create(path)?);
        report.write_json(file)?;
        tracing::info!(path = %path.display(), "report written");
    }
    if let Some(path) = &options.timings {
        tracing::info!(path = %path.display(), "timings written");
    }

    print_summary(&report, after.saturating_sub(before));
    write_scale(&report, options.format)?;

    Ok(exit_code(options.strict && report.has_mismatch()))
}

fn exit_code(mismatch: bool) -> ExitCode {
    if mismatch {
        ExitCode::from(MISMATCH_EXIT)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_check(check: &CorrectnessCheck) {
    println!(
        "Sequential -> best row = {}, ones = {}",
        check.sequential.index, check.sequential.value
    );
    println!(
        "D&C        -> best row = {}, ones = {}",
        check.dac.index, check.dac.value
    );
    if check.equal {
        println!("OK: sequential and D&C agree.");
    } else {
        println!("WARNING: sequential and D&C results differ!");
    }
}

fn print_summary(report: &BenchmarkReport, rss_delta_kib: u64) {
    let shape = report.shape;
    let full = &report.full_matrix_timing;
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Busiest-row benchmark: R={}, T={}", shape.rows, shape.cols);
    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "  ones={} sparsity={:.4}",
        report.summary.ones, report.summary.sparsity
    );
    eprintln!(
        "  sequential: best row = {}, ones = {}",
        report.correctness.sequential.index, report.correctness.sequential.value
    );
    eprintln!(
        "  dac:        best row = {}, ones = {}",
        report.correctness.dac.index, report.correctness.dac.value
    );
    eprintln!();
    eprintln!("Full matrix ({} runs):", full.n_runs);
    eprintln!(
        "  sequential: mean = {:.6} s, std = {:.6} s",
        full.sequential.mean, full.sequential.std
    );
    eprintln!(
        "  dac:        mean = {:.6} s, std = {:.6} s",
        full.dac.mean, full.dac.std
    );
    if full.sequential.mean > 0.0 {
        eprintln!(
            "  dac / sequential = {:.2}x",
            full.dac.mean / full.sequential.mean
        );
    }
    eprintln!("  rss delta: {rss_delta_kib} KiB");
    eprintln!();

    let points = &report.scale_experiment.points;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() >= 2 && first.dac.mean > 0.0 && first.sequential.mean > 0.0 {
            eprintln!(
                "Scaling T={} -> T={}: sequential {:.2}x, dac {:.2}x",
                first.width,
                last.width,
                last.sequential.mean / first.sequential.mean,
                last.dac.mean / first.dac.mean
            );
        }
    }

    if report.warnings.is_empty() {
        eprintln!("All checks agree.");
    } else {
        eprintln!("{} disagreement(s):", report.warnings.len());
        for w in &report.warnings {
            eprintln!("  {w}");
        }
    }
    eprintln!("{}", "=".repeat(80));
}

fn scale_rows(report: &BenchmarkReport) -> Vec<ScaleRow> {
    report
        .scale_experiment
        .points
        .iter()
        .map(|p| ScaleRow {
            width: p.width,
            sequential_mean: p.sequential.mean,
            sequential_std: p.sequential.std,
            dac_mean: p.dac.mean,
            dac_std: p.dac.std,
            agree: p.agree,
        })
        .collect()
}

fn write_scale(report: &BenchmarkReport, format: OutputFormat) -> Result<(), OccError> {
    let rows = scale_rows(report);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:>8}  {:>14}  {:>14}  {:>14}  {:>14}  {:>5}",
                "T", "seq_mean_s", "seq_std_s", "dac_mean_s", "dac_std_s", "agree"
            )?;
            writeln!(
                out,
                "{:-<8}  {:-<14}  {:-<14}  {:-<14}  {:-<14}  {:-<5}",
                "", "", "", "", "", ""
            )?;
            for r in &rows {
                writeln!(
                    out,
                    "{:>8}  {:>14.8}  {:>14.8}  {:>14.8}  {:>14.8}  {:>5}",
                    r.width,
                    r.sequential_mean,
                    r.sequential_std,
                    r.dac_mean,
                    r.dac_std,
                    r.agree
                )?;
            }
        }
    }
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    let Ok(pid) = get_current_pid() else {
        return 0;
    };
    sys.refresh_process(pid);
    sys.process(pid).map(|p| p.memory() / 1024).unwrap_or(0)
}
