//! Shared data model of the pairwise scanners: integer genotype matrices and per-locus lookup tables.

mod kind;
pub use kind::ErrorKind;

pub mod matrix;
pub use matrix::{GenotypeMatrix, is_called, MISSING};

pub mod lookup;
pub use lookup::{LookupTable, LocusBlock};
