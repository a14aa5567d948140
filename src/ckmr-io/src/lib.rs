//! File-level input and output of the ckmr-rs command line: genotype matrices, lookup tables and tabular results.

pub mod read;
pub mod write;
pub mod parse;
