use genotypes::{GenotypeMatrix, LookupTable, is_called};
use log::debug;
use rayon::prelude::*;

use crate::{LocusVisitor, ScanError, MatrixRole};

mod result;
pub use result::{PairwiseRecord, PairwiseResult, PairwiseColumns};

/// A locus where the target individual carries a call, resolved against the lookup table.
///  - `base`: offset of the `[0][target]` value within the flat lookup values.
#[derive(Debug, Clone, Copy)]
struct TargetLocus {
    locus  : usize,
    n_genos: usize,
    base   : usize,
}

/// Directional comparison of every source individual against a single target individual.
///
/// For each source individual, the scanner sums `table[locus][source genotype][target genotype]`
/// over every locus where both individuals carry a call, scanning loci in column order.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseLikelihoodScanner<'a> {
    table: &'a LookupTable,
}

impl<'a> PairwiseLikelihoodScanner<'a> {
    #[must_use]
    pub fn new(table: &'a LookupTable) -> Self {
        Self{table}
    }

    /// Compare every individual of `source` against the `target_index`-th (1-based) individual of `target`.
    ///
    /// # Errors
    /// - `LocusCountMismatch` if `source` and `target` carry a different number of loci.
    /// - `LookupLocusMismatch` if the lookup table does not describe as many loci as the matrices.
    /// - `TargetOutOfRange` if `target_index` lies outside of `[1, target.n_rows()]`.
    /// - `GenotypeOutOfRange` if a called genotype code of the target is not below its locus cardinality,
    ///   or if a compared genotype code of the source is. Target codes are checked before any comparison,
    ///   even if no source individual is called at that locus.
    /// - `LookupOffsetOutOfRange` if a computed offset falls outside of the lookup values.
    pub fn scan(&self, source: &GenotypeMatrix, target: &GenotypeMatrix, target_index: usize) -> Result<PairwiseResult, ScanError> {
        self.scan_observed(source, target, target_index, &())
    }

    /// Same as [`PairwiseLikelihoodScanner::scan`], notifying `visitor` for every inspected locus.
    ///
    /// # Errors
    /// See [`PairwiseLikelihoodScanner::scan`]
    pub fn scan_observed<V: LocusVisitor>(
        &self,
        source      : &GenotypeMatrix,
        target      : &GenotypeMatrix,
        target_index: usize,
        visitor     : &V
    ) -> Result<PairwiseResult, ScanError> {
        let loci = self.prepare(source, target, target_index)?;
        source.rows()
            .enumerate()
            .map(|(row, genotypes)| self.accumulate(row, genotypes, &loci, visitor))
            .collect()
    }

    /// Data-parallel version of [`PairwiseLikelihoodScanner::scan`], dispatched across source individuals
    /// on the current rayon thread pool. Records are returned in source-row order, and are identical to
    /// those of the sequential scan.
    ///
    /// # Errors
    /// See [`PairwiseLikelihoodScanner::scan`]. When several rows are invalid, which of their errors gets
    /// reported is unspecified.
    pub fn par_scan(&self, source: &GenotypeMatrix, target: &GenotypeMatrix, target_index: usize) -> Result<PairwiseResult, ScanError> {
        let loci = self.prepare(source, target, target_index)?;
        let records = (0..source.n_rows()).into_par_iter()
            .map(|row| self.accumulate(row, source.row(row), &loci, &()))
            .collect::<Result<Vec<PairwiseRecord>, ScanError>>()?;
        Ok(PairwiseResult::from(records))
    }

    /// Run [`PairwiseLikelihoodScanner::scan`] for several target individuals, in request order.
    ///
    /// # Errors
    /// Aborts on the first failing target. See [`PairwiseLikelihoodScanner::scan`]
    pub fn scan_targets(
        &self,
        source        : &GenotypeMatrix,
        target        : &GenotypeMatrix,
        target_indices: &[usize]
    ) -> Result<Vec<(usize, PairwiseResult)>, ScanError> {
        target_indices.iter()
            .map(|&index| self.scan(source, target, index).map(|result| (index, result)))
            .collect()
    }

    /// Validate dimensions, then resolve the loci where the target individual carries a call.
    fn prepare(&self, source: &GenotypeMatrix, target: &GenotypeMatrix, target_index: usize) -> Result<Vec<TargetLocus>, ScanError> {
        source.check_same_loci(target).map_err(ScanError::LocusCountMismatch)?;

        if self.table.n_loci() != source.n_cols() {
            return Err(ScanError::LookupLocusMismatch{table_loci: self.table.n_loci(), matrix_loci: source.n_cols()})
        }

        let target_row = target_index.checked_sub(1)
            .and_then(|row| target.get_row(row))
            .ok_or(ScanError::TargetOutOfRange{index: target_index, n_rows: target.n_rows()})?;

        debug!("Pairwise scan: {} source individuals x {} loci against target {target_index}", source.n_rows(), source.n_cols());

        let n_genos = self.table.n_genos();
        let starts  = self.table.starts();
        let mut loci = Vec::with_capacity(target_row.len());
        for (locus, &code) in target_row.iter().enumerate() {
            if !is_called(code) {
                continue
            }
            let n_genos = n_genos[locus];
            let tg = code as usize;
            if tg >= n_genos {
                return Err(ScanError::GenotypeOutOfRange{role: MatrixRole::Target, individual: target_index, locus, code, n_genos})
            }
            loci.push(TargetLocus{locus, n_genos, base: starts[locus] + tg});
        }
        debug!("Target {target_index} carries {} called loci out of {}", loci.len(), target_row.len());
        Ok(loci)
    }

    /// Sum lookup values of a single source individual over the called loci of the target.
    #[inline]
    fn accumulate<V: LocusVisitor>(&self, row: usize, genotypes: &[i32], loci: &[TargetLocus], visitor: &V) -> Result<PairwiseRecord, ScanError> {
        let values = self.table.values();
        let mut sum = 0.0;
        let mut num_loc = 0;
        for &TargetLocus{locus, n_genos, base} in loci {
            visitor.visit();
            let code = genotypes[locus];
            if !is_called(code) {
                continue
            }
            let sg = code as usize;
            if sg >= n_genos {
                return Err(ScanError::GenotypeOutOfRange{role: MatrixRole::Source, individual: row + 1, locus, code, n_genos})
            }
            let offset = base + n_genos * sg;
            let value = values.get(offset)
                .ok_or(ScanError::LookupOffsetOutOfRange{locus, offset, len: values.len()})?;
            sum += value;
            num_loc += 1;
        }
        Ok(PairwiseRecord::from_row(row, sum, num_loc))
    }
}

/// Compare every individual of `source` against the `target_index`-th (1-based) individual of `target`.
///
/// # Errors
/// See [`PairwiseLikelihoodScanner::scan`]
pub fn scan_pairwise(
    source      : &GenotypeMatrix,
    target      : &GenotypeMatrix,
    target_index: usize,
    table       : &LookupTable
) -> Result<PairwiseResult, ScanError> {
    PairwiseLikelihoodScanner::new(table).scan(source, target, target_index)
}
