use std::fmt::{self, Display, Formatter};

/// Coarse classification shared by every error of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Locus counts disagree between two matrices, or lookup metadata disagrees with the locus count.
    DimensionMismatch,
    /// A row index, genotype code or lookup offset lies outside of its valid range.
    IndexOutOfRange,
    /// A malformed argument, such as a negative mismatch bound or an empty genotype cardinality.
    InvalidArgument,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::DimensionMismatch => "dimension mismatch",
            Self::IndexOutOfRange   => "index out of range",
            Self::InvalidArgument   => "invalid argument",
        };
        write!(f, "{kind}")
    }
}
