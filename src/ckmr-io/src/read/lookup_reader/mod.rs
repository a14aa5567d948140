use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use anyhow::Result;
use log::info;

use located_error::LocatedError;
use genotypes::{LookupTable, LocusBlock};

mod error;
pub use error::LookupReaderError;

/// Parse a lookup table: one locus per line, in locus order.
///
/// Each line starts with the number of genotypes `n` of the locus, followed by the `n²` values of its
/// block, row-major (`[source genotype][target genotype]`). Fields are whitespace-delimited.
///
/// # Errors
/// - `ParseCardinality` or `ParseValue` on unparseable fields.
/// - `Block` if a line does not carry exactly `n²` values, or if `n == 0`.
pub fn parse_lookup_table<R: BufRead>(reader: R) -> Result<LookupTable, LookupReaderError> {
    use LookupReaderError::{ReadLine, ParseCardinality, ParseValue, Block};
    let mut blocks = Vec::new();
    for (line, content) in super::data_lines(reader) {
        let content = content.map_err(|err| ReadLine{line, err})?;
        let mut fields = content.split_whitespace();

        // data_lines() never yields blank lines.
        let cardinality = fields.next().unwrap_or_default();
        let n_genos: usize = cardinality.parse()
            .map_err(|_| ParseCardinality{line, value: cardinality.to_string()})?;

        let values = fields.enumerate()
            .map(|(field, value)| value.parse::<f64>().map_err(|_| ParseValue{line, field: field + 2, value: value.to_string()}))
            .collect::<Result<Vec<f64>, _>>()?;

        blocks.push(LocusBlock::new(n_genos, values).map_err(|err| Block{line, err})?);
    }
    Ok(LookupTable::from_blocks(blocks)?)
}

/// Read a lookup table from a file. See [`parse_lookup_table`] for the expected format.
///
/// # Errors
/// - if `path` cannot be opened, or contains an invalid table.
pub fn read_lookup_table(path: &Path) -> Result<LookupTable> {
    use LookupReaderError::OpenFile;
    let loc_msg = || format!("While reading lookup table {}", path.display());
    let file = File::open(path)
        .map_err(|err| OpenFile(path.display().to_string(), err))
        .with_loc(loc_msg)?;

    let table = parse_lookup_table(BufReader::new(file)).with_loc(loc_msg)?;
    info!("Read {} loci ({} values) from {}", table.n_loci(), table.values().len(), path.display());
    Ok(table)
}
