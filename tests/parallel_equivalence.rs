#![cfg(feature = "parallel")]

use occ_dac::{
    dac_best_row, reduce::row_counts, sequential_best_row, tournament::argmax, OccupancyMatrix,
    Selection,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn first_max(counts: &[u64]) -> Selection {
    let mut best = Selection::new(0, counts[0]);
    for (i, &c) in counts.iter().enumerate().skip(1) {
        if c > best.value {
            best = Selection::new(i, c);
        }
    }
    best
}

proptest! {
    #[test]
    fn parallel_reducer_matches_row_sums(
        (rows, cols, cells) in (1usize..20, 1usize..200).prop_flat_map(|(r, c)| {
            (Just(r), Just(c), prop::collection::vec(0u8..=1, r * c))
        })
    ) {
        let expected: Vec<u64> = cells
            .chunks(cols)
            .map(|row| row.iter().map(|&c| c as u64).sum())
            .collect();
        let m = OccupancyMatrix::from_flat(rows, cols, cells).unwrap();
        prop_assert_eq!(row_counts(m.view()).unwrap(), expected);
        prop_assert_eq!(
            dac_best_row(m.view()).unwrap(),
            sequential_best_row(m.view()).unwrap()
        );
    }

    #[test]
    fn parallel_tournament_keeps_first_maximum(
        counts in prop::collection::vec(0u64..3, 1..256)
    ) {
        prop_assert_eq!(argmax(&counts).unwrap(), first_max(&counts));
    }
}

#[test]
fn parallel_agrees_on_wide_matrix() {
    let mut rng = StdRng::seed_from_u64(99);
    let (rows, cols) = (32, 4096);
    let cells = (0..rows * cols).map(|_| rng.gen_bool(0.5) as u8).collect();
    let m = OccupancyMatrix::from_flat(rows, cols, cells).unwrap();
    for width in [1, 17, 1000, 4096] {
        let view = m.prefix(width).unwrap();
        assert_eq!(dac_best_row(view).unwrap(), sequential_best_row(view).unwrap());
    }
}
