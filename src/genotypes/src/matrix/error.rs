use thiserror::Error;

use crate::ErrorKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenotypeMatrixError {
    #[error("Expected {n_rows} x {n_cols} genotype codes, got {got}")]
    FlatLength{n_rows: usize, n_cols: usize, got: usize},

    #[error("A {n_rows} x {n_cols} genotype matrix overflows addressable memory")]
    Overflow{n_rows: usize, n_cols: usize},

    #[error("Row {row} carries {got} loci, while previous rows carry {expected}")]
    RaggedRow{row: usize, expected: usize, got: usize},

    #[error("Genotype matrices disagree on their number of loci ({left} vs. {right})")]
    LocusCountMismatch{left: usize, right: usize},
}

impl GenotypeMatrixError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Overflow{..} => ErrorKind::InvalidArgument,
            _                  => ErrorKind::DimensionMismatch,
        }
    }
}
