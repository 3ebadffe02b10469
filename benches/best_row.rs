use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use occ_dac::{dac_best_row, sequential_best_row, OccupancyMatrix};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, System};

const ROWS: usize = 16;

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> OccupancyMatrix {
    let cells = (0..rows * cols).map(|_| rng.gen_bool(0.4) as u8).collect();
    OccupancyMatrix::from_flat(rows, cols, cells).unwrap()
}

fn rss_kib(sys: &mut System) -> u64 {
    let pid = get_current_pid().unwrap();
    sys.refresh_process(pid);
    sys.process(pid).map(|p| p.memory() / 1024).unwrap_or(0)
}

fn bench_best_row(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let m = random_matrix(&mut rng, ROWS, 8_192);
    let mut sys = System::new();

    let mut group = c.benchmark_group("best_row_by_width");
    for &width in &[288usize, 1_024, 4_096, 8_192] {
        let view = m.prefix(width).unwrap();
        group.bench_with_input(BenchmarkId::new("sequential", width), &view, |b, v| {
            b.iter(|| criterion::black_box(sequential_best_row(*v).unwrap()))
        });

        let before = rss_kib(&mut sys);
        group.bench_with_input(BenchmarkId::new("dac", width), &view, |b, v| {
            b.iter(|| criterion::black_box(dac_best_row(*v).unwrap()))
        });
        let after = rss_kib(&mut sys);
        // Report to stderr to keep criterion output clean.
        eprintln!("RSS KiB delta (dac T={width}): {}", after.saturating_sub(before));
    }
    group.finish();
}

criterion_group!(benches, bench_best_row);
criterion_main!(benches);
