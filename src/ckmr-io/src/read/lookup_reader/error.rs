use thiserror::Error;

use genotypes::lookup::LookupTableError;

#[derive(Error, Debug)]
pub enum LookupReaderError {
    #[error("Failed to open lookup table {0}")]
    OpenFile(String, #[source] std::io::Error),

    #[error("Failed to read line {line}")]
    ReadLine{line: usize, #[source] err: std::io::Error},

    #[error("Line {line}: '{value}' is not a valid number of genotypes")]
    ParseCardinality{line: usize, value: String},

    #[error("Line {line}, field {field}: '{value}' is not a valid lookup value")]
    ParseValue{line: usize, field: usize, value: String},

    #[error("Line {line}: invalid locus block")]
    Block{line: usize, #[source] err: LookupTableError},

    #[error(transparent)]
    Table(#[from] LookupTableError),
}
