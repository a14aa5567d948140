use std::ops::Range;

use genotypes::{GenotypeMatrix, is_called};
use log::debug;
use rayon::prelude::*;

use crate::{LocusVisitor, ScanError};

mod result;
pub use result::{MismatchRecord, MismatchResult, MismatchColumns};

/// Count mismatching and compared loci between two individuals, in locus order.
///
/// Returns `None` as soon as the mismatch count exceeds `max_mismatch`. Mismatches never decrease as
/// more loci are scanned, so an abandoned pair could never have qualified.
#[inline]
fn compare_pair<V: LocusVisitor>(a: &[i32], b: &[i32], max_mismatch: usize, visitor: &V) -> Option<(usize, usize)> {
    let mut num_mismatch = 0;
    let mut num_loc      = 0;
    for (&g1, &g2) in a.iter().zip(b) {
        visitor.visit();
        if is_called(g1) && is_called(g2) {
            num_loc += 1;
            if g1 != g2 {
                num_mismatch += 1;
                if num_mismatch > max_mismatch {
                    return None
                }
            }
        }
    }
    Some((num_mismatch, num_loc))
}

/// Finds every pair of individuals whose genotypes mismatch at no more than `max_mismatch` loci.
///
/// Loci where either individual is missing are ignored. Pairs are scanned locus by locus, and
/// abandoned as soon as they exceed the tolerated number of mismatches. The output is the same as
/// that of an exhaustive scan filtered afterwards, but most unrelated pairs only cost a handful of loci.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateScanner {
    max_mismatch: usize,
}

impl DuplicateScanner {
    /// # Errors
    /// - `NegativeMismatchBound` if `max_mismatch < 0`
    pub fn new(max_mismatch: i64) -> Result<Self, ScanError> {
        let max_mismatch = usize::try_from(max_mismatch)
            .map_err(|_| ScanError::NegativeMismatchBound(max_mismatch))?;
        Ok(Self{max_mismatch})
    }

    #[must_use]
    pub fn max_mismatch(&self) -> usize {
        self.max_mismatch
    }

    /// Scan every pair `(i, j)`, `i < j`, of `source`. Records are sorted by `(ind1, ind2)`.
    #[must_use]
    pub fn scan(&self, source: &GenotypeMatrix) -> MismatchResult {
        self.scan_observed(source, &())
    }

    /// Same as [`DuplicateScanner::scan`], notifying `visitor` for every inspected locus.
    #[must_use]
    pub fn scan_observed<V: LocusVisitor>(&self, source: &GenotypeMatrix, visitor: &V) -> MismatchResult {
        self.scan_outer_range_observed(source, 0..source.n_rows(), visitor)
    }

    /// Scan the pairs `(i, j)`, `i < j`, for which the outer index `i` (0-based) lies within `rows`.
    ///
    /// Concatenating the results of consecutive ranges covering `0..source.n_rows()` yields the output
    /// of [`DuplicateScanner::scan`]. Bounds beyond the number of individuals are clamped.
    #[must_use]
    pub fn scan_outer_range(&self, source: &GenotypeMatrix, rows: Range<usize>) -> MismatchResult {
        self.scan_outer_range_observed(source, rows, &())
    }

    fn scan_outer_range_observed<V: LocusVisitor>(&self, source: &GenotypeMatrix, rows: Range<usize>, visitor: &V) -> MismatchResult {
        let rows = rows.start.min(source.n_rows())..rows.end.min(source.n_rows());
        debug!("Duplicate scan: outer rows {rows:?} of {} individuals x {} loci, max mismatch: {}",
            source.n_rows(), source.n_cols(), self.max_mismatch
        );
        let result: MismatchResult = rows.flat_map(|i| self.scan_row(source, i, visitor)).collect();
        debug!("Duplicate scan: {} qualifying pairs", result.len());
        result
    }

    /// Data-parallel version of [`DuplicateScanner::scan`], dispatched across outer indices on the current
    /// rayon thread pool. Records are returned in the same order as the sequential scan.
    #[must_use]
    pub fn par_scan(&self, source: &GenotypeMatrix) -> MismatchResult {
        self.par_scan_observed(source, &())
    }

    /// Same as [`DuplicateScanner::par_scan`], notifying `visitor` for every inspected locus.
    #[must_use]
    pub fn par_scan_observed<V: LocusVisitor>(&self, source: &GenotypeMatrix, visitor: &V) -> MismatchResult {
        debug!("Parallel duplicate scan: {} individuals x {} loci, max mismatch: {}",
            source.n_rows(), source.n_cols(), self.max_mismatch
        );
        // Indexed collect: per-row chunks come back in row order.
        let chunks: Vec<Vec<MismatchRecord>> = (0..source.n_rows()).into_par_iter()
            .map(|i| self.scan_row(source, i, visitor))
            .collect();
        let result: MismatchResult = chunks.into_iter().flatten().collect();
        debug!("Parallel duplicate scan: {} qualifying pairs", result.len());
        result
    }

    /// Every qualifying pair `(i, j)` for a fixed outer index `i`, sorted by `j`.
    fn scan_row<V: LocusVisitor>(&self, source: &GenotypeMatrix, i: usize, visitor: &V) -> Vec<MismatchRecord> {
        let a = source.row(i);
        (i + 1..source.n_rows())
            .filter_map(|j| {
                compare_pair(a, source.row(j), self.max_mismatch, visitor)
                    .map(|(num_mismatch, num_loc)| MismatchRecord::from_rows(i, j, num_mismatch, num_loc))
            })
            .collect()
    }
}

/// Return every pair of individuals of `source` mismatching at no more than `max_mismatch` loci.
///
/// # Errors
/// - `NegativeMismatchBound` if `max_mismatch < 0`
pub fn find_close_genotype_pairs(source: &GenotypeMatrix, max_mismatch: i64) -> Result<MismatchResult, ScanError> {
    Ok(DuplicateScanner::new(max_mismatch)?.scan(source))
}
