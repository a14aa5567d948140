//! Bulk pairwise scans over genotype matrices.
//!
//! - [`PairwiseLikelihoodScanner`]: directional, single-target accumulation of per-locus lookup values.
//! - [`DuplicateScanner`]: all-pairs mismatch counting, with early exit once a pair exceeds the
//!   tolerated number of mismatches.
//!
//! Individuals are indexed from 0 throughout the scans. Result records carry 1-based indices: the
//! conversion happens when records are built, and nowhere else.

mod error;
pub use error::{ScanError, MatrixRole};

mod visitor;
pub use visitor::LocusVisitor;

pub mod likelihood;
pub use likelihood::{PairwiseLikelihoodScanner, PairwiseRecord, PairwiseResult, PairwiseColumns, scan_pairwise};

pub mod duplicates;
pub use duplicates::{DuplicateScanner, MismatchRecord, MismatchResult, MismatchColumns, find_close_genotype_pairs};

#[cfg(test)]
mod tests;

/// Pretty-print field separator. Writers substitute it with a tab.
pub const DISPL_SEP        : &str  = " - ";
const INDEX_FORMAT_LEN     : usize = 8;
const COUNT_FORMAT_LEN     : usize = 8;
const VALUE_FORMAT_LEN     : usize = 12;
