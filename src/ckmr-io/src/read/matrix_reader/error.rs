use thiserror::Error;

use genotypes::matrix::GenotypeMatrixError;

#[derive(Error, Debug)]
pub enum MatrixReaderError {
    #[error("Failed to open genotype matrix {0}")]
    OpenFile(String, #[source] std::io::Error),

    #[error("Failed to read line {line}")]
    ReadLine{line: usize, #[source] err: std::io::Error},

    #[error("Line {line}, field {field}: '{value}' is neither an integer genotype code, nor a missing call ('NA', '.')")]
    ParseCode{line: usize, field: usize, value: String},

    #[error("Line {line} carries {got} genotype codes, while previous lines carry {expected}")]
    RaggedLine{line: usize, expected: usize, got: usize},

    #[error(transparent)]
    Matrix(#[from] GenotypeMatrixError),
}
