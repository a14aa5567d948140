use thiserror::Error;

use crate::ErrorKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupTableError {
    #[error("Lookup metadata lengths disagree: {n_genos} genotype cardinalities for {starts} block starts")]
    MetadataLength{n_genos: usize, starts: usize},

    #[error("Genotype cardinality must be strictly positive{}", locus.map(|l| format!(" (locus {l})")).unwrap_or_default())]
    EmptyCardinality{locus: Option<usize>},

    #[error("A block of {n_genos} genotypes requires {} values, got {got}", n_genos * n_genos)]
    BlockLength{n_genos: usize, got: usize},

    #[error("Block of locus {locus} spans [{start}, {end}), beyond the {len} available lookup values")]
    BlockOutOfRange{locus: usize, start: usize, end: usize, len: usize},

    #[error("Lookup table block size overflows addressable memory")]
    Overflow,
}

impl LookupTableError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MetadataLength{..} | Self::BlockLength{..} => ErrorKind::DimensionMismatch,
            Self::BlockOutOfRange{..}                         => ErrorKind::IndexOutOfRange,
            Self::EmptyCardinality{..} | Self::Overflow       => ErrorKind::InvalidArgument,
        }
    }
}
