use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use anyhow::Result;
use log::{debug, info};

use located_error::LocatedError;
use genotypes::{GenotypeMatrix, MISSING};

mod error;
pub use error::MatrixReaderError;

/// Tokens read as a missing genotype call, in addition to negative integers.
const MISSING_TOKENS: [&str; 2] = ["NA", "."];

fn parse_code(token: &str) -> Option<i32> {
    if MISSING_TOKENS.contains(&token) {
        return Some(MISSING)
    }
    token.parse().ok()
}

/// Parse a whitespace-delimited genotype matrix: one individual per line, one code per locus.
///
/// # Errors
/// - `ParseCode` if any field is not an integer or a missing-call token.
/// - `RaggedLine` if lines disagree on the number of loci.
pub fn parse_genotype_matrix<R: BufRead>(reader: R) -> Result<GenotypeMatrix, MatrixReaderError> {
    use MatrixReaderError::{ReadLine, ParseCode, RaggedLine};
    let mut codes  = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;
    for (line, content) in super::data_lines(reader) {
        let content = content.map_err(|err| ReadLine{line, err})?;
        let row_start = codes.len();
        for (field, token) in content.split_whitespace().enumerate() {
            let code = parse_code(token).ok_or_else(|| ParseCode{line, field: field + 1, value: token.to_string()})?;
            codes.push(code);
        }

        let got = codes.len() - row_start;
        let expected = *n_cols.get_or_insert(got);
        if got != expected {
            return Err(RaggedLine{line, expected, got})
        }
        n_rows += 1;
    }
    Ok(GenotypeMatrix::new(n_rows, n_cols.unwrap_or(0), codes)?)
}

/// Read a genotype matrix from a file. See [`parse_genotype_matrix`] for the expected format.
///
/// # Errors
/// - if `path` cannot be opened, or contains an invalid matrix.
pub fn read_genotype_matrix(path: &Path) -> Result<GenotypeMatrix> {
    use MatrixReaderError::OpenFile;
    let loc_msg = || format!("While reading genotype matrix {}", path.display());
    let file = File::open(path)
        .map_err(|err| OpenFile(path.display().to_string(), err))
        .with_loc(loc_msg)?;

    let matrix = parse_genotype_matrix(BufReader::new(file)).with_loc(loc_msg)?;
    info!("Read {} individuals x {} loci from {}", matrix.n_rows(), matrix.n_cols(), path.display());
    if matrix.is_empty() {
        debug!("{} does not contain any individual", path.display());
    }
    Ok(matrix)
}
