use genotypes::{GenotypeMatrix, LookupTable, is_called, MISSING};
use itertools::Itertools;

use crate::{PairwiseRecord, MismatchRecord};

fn random_code(n_genos: usize, missing_rate: f64) -> i32 {
    if fastrand::f64() < missing_rate {
        // Exercise more than a single missing sentinel.
        return if fastrand::bool() { MISSING } else { fastrand::i32(i32::MIN..0) }
    }
    fastrand::usize(0..n_genos) as i32
}

/// Uniformly random genotype codes within `0..n_genos`, with a proportion of missing calls.
pub fn random_matrix(n_rows: usize, n_cols: usize, n_genos: usize, missing_rate: f64) -> GenotypeMatrix {
    let codes = (0..n_rows * n_cols).map(|_| random_code(n_genos, missing_rate)).collect();
    GenotypeMatrix::new(n_rows, n_cols, codes).expect("n_rows * n_cols codes")
}

/// Random matrix where about half of the individuals are noisy copies of an earlier one. Ensures
/// mismatch scans have qualifying pairs across a wide range of bounds.
pub fn near_duplicates(n_rows: usize, n_cols: usize, n_genos: usize, missing_rate: f64) -> GenotypeMatrix {
    let mut rows: Vec<Vec<i32>> = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        let row = if i > 0 && fastrand::bool() {
            let mut copy = rows[fastrand::usize(0..i)].clone();
            let n_edits = fastrand::usize(0..=n_cols / 4);
            for _ in 0..n_edits {
                let locus = fastrand::usize(0..n_cols);
                copy[locus] = random_code(n_genos, missing_rate);
            }
            copy
        } else {
            (0..n_cols).map(|_| random_code(n_genos, missing_rate)).collect()
        };
        rows.push(row);
    }
    GenotypeMatrix::new(n_rows, n_cols, rows.concat()).expect("n_rows * n_cols codes")
}

/// Exhaustive, unpruned reference for the likelihood scan.
pub fn naive_pairwise(source: &GenotypeMatrix, target: &GenotypeMatrix, target_index: usize, table: &LookupTable) -> Vec<PairwiseRecord> {
    let tg = target.row(target_index - 1);
    source.rows().enumerate().map(|(i, sg)| {
        let mut value = 0.0;
        let mut num_loc = 0;
        for locus in 0..source.n_cols() {
            if is_called(sg[locus]) && is_called(tg[locus]) {
                value += table.value(locus, sg[locus] as usize, tg[locus] as usize).expect("code within cardinality");
                num_loc += 1;
            }
        }
        PairwiseRecord{ind: i + 1, value, num_loc}
    }).collect()
}

/// Exhaustive reference for the mismatch scan: compare every locus of every pair, then filter.
pub fn naive_duplicates(source: &GenotypeMatrix, max_mismatch: usize) -> Vec<MismatchRecord> {
    (0..source.n_rows()).tuple_combinations()
        .filter_map(|(i, j)| {
            let (num_mismatch, num_loc) = source.row(i).iter().zip(source.row(j))
                .filter(|(a, b)| is_called(**a) && is_called(**b))
                .fold((0, 0), |(mm, n), (a, b)| (mm + usize::from(a != b), n + 1));
            (num_mismatch <= max_mismatch).then_some(MismatchRecord{ind1: i + 1, ind2: j + 1, num_mismatch, num_loc})
        })
        .collect()
}
