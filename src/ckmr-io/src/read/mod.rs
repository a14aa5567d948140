mod matrix_reader;
pub use matrix_reader::{read_genotype_matrix, parse_genotype_matrix, MatrixReaderError};

mod lookup_reader;
pub use lookup_reader::{read_lookup_table, parse_lookup_table, LookupReaderError};

/// Lines of a delimited text file that carry data: blank lines and '#' comments are skipped.
/// Yields `(1-based line number, line)`.
fn data_lines<R: std::io::BufRead>(reader: R) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        }))
}
