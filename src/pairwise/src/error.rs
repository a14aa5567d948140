use std::fmt::{self, Display, Formatter};

use genotypes::{ErrorKind, matrix::GenotypeMatrixError};
use thiserror::Error;

/// Which of the two compared matrices an individual belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixRole {Source, Target}

impl Display for MatrixRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Source and target matrices disagree on their number of loci")]
    LocusCountMismatch(#[source] GenotypeMatrixError),

    #[error("Lookup table describes {table_loci} loci, while genotype matrices carry {matrix_loci}")]
    LookupLocusMismatch{table_loci: usize, matrix_loci: usize},

    #[error("Target index {index} is out of range. Target matrix holds {n_rows} individuals, and indices are 1-based")]
    TargetOutOfRange{index: usize, n_rows: usize},

    #[error("Genotype code {code} of {role} individual {individual} at locus {locus} is not below the {n_genos} genotypes of this locus")]
    GenotypeOutOfRange{role: MatrixRole, individual: usize, locus: usize, code: i32, n_genos: usize},

    #[error("Lookup offset {offset} of locus {locus} falls outside of the {len} available lookup values")]
    LookupOffsetOutOfRange{locus: usize, offset: usize, len: usize},

    #[error("The maximum number of tolerated mismatches must be non-negative, got {0}")]
    NegativeMismatchBound(i64),
}

impl ScanError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LocusCountMismatch(_) | Self::LookupLocusMismatch{..} => ErrorKind::DimensionMismatch,
            Self::TargetOutOfRange{..}
            | Self::GenotypeOutOfRange{..}
            | Self::LookupOffsetOutOfRange{..}                          => ErrorKind::IndexOutOfRange,
            Self::NegativeMismatchBound(_)                              => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        let expected = [
            (ScanError::LocusCountMismatch(GenotypeMatrixError::LocusCountMismatch{left: 2, right: 3}), ErrorKind::DimensionMismatch),
            (ScanError::LookupLocusMismatch{table_loci: 3, matrix_loci: 2},                            ErrorKind::DimensionMismatch),
            (ScanError::TargetOutOfRange{index: 0, n_rows: 2},                                         ErrorKind::IndexOutOfRange),
            (ScanError::GenotypeOutOfRange{role: MatrixRole::Source, individual: 1, locus: 0, code: 2, n_genos: 2}, ErrorKind::IndexOutOfRange),
            (ScanError::LookupOffsetOutOfRange{locus: 0, offset: 4, len: 4},                           ErrorKind::IndexOutOfRange),
            (ScanError::NegativeMismatchBound(-1),                                                     ErrorKind::InvalidArgument),
        ];
        for (err, kind) in expected {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }
}
