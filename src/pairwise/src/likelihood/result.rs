use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use crate::{DISPL_SEP, INDEX_FORMAT_LEN, VALUE_FORMAT_LEN};

/// Accumulated score of a single source individual against the target individual.
///  - `ind`    : 1-based index of the individual within the source matrix.
///  - `value`  : sum of lookup values over loci where both individuals carry a call.
///  - `num_loc`: number of such loci.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseRecord {
    pub ind    : usize,
    pub value  : f64,
    pub num_loc: usize,
}

impl PairwiseRecord {
    /// Build a record from a 0-based row index.
    pub(crate) fn from_row(row: usize, value: f64, num_loc: usize) -> Self {
        Self{ind: row + 1, value, num_loc}
    }
}

impl Display for PairwiseRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <INDEX_FORMAT_LEN$}{DISPL_SEP}{: <VALUE_FORMAT_LEN$}{DISPL_SEP}{}",
            self.ind, self.value, self.num_loc
        )
    }
}

/// Column-oriented view of a [`PairwiseResult`]: one vector per field, all of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairwiseColumns {
    pub ind    : Vec<usize>,
    pub value  : Vec<f64>,
    pub num_loc: Vec<usize>,
}

/// One record per source individual, in source-row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairwiseResult(Vec<PairwiseRecord>);

impl PairwiseResult {
    /// Column names, in `Display` order.
    pub const FIELDS: [&'static str; 3] = ["ind", "value", "num_loc"];

    #[must_use]
    pub fn header() -> String {
        let [ind, value, num_loc] = Self::FIELDS;
        format!("{ind: <INDEX_FORMAT_LEN$}{DISPL_SEP}{value: <VALUE_FORMAT_LEN$}{DISPL_SEP}{num_loc}")
    }

    #[must_use]
    pub fn records(&self) -> &[PairwiseRecord] {
        &self.0
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PairwiseRecord> {
        self.0
    }

    /// Split records into parallel columns.
    #[must_use]
    pub fn to_columns(&self) -> PairwiseColumns {
        let mut columns = PairwiseColumns {
            ind    : Vec::with_capacity(self.0.len()),
            value  : Vec::with_capacity(self.0.len()),
            num_loc: Vec::with_capacity(self.0.len()),
        };
        for record in &self.0 {
            columns.ind.push(record.ind);
            columns.value.push(record.value);
            columns.num_loc.push(record.num_loc);
        }
        columns
    }
}

impl From<Vec<PairwiseRecord>> for PairwiseResult {
    fn from(records: Vec<PairwiseRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<PairwiseRecord> for PairwiseResult {
    fn from_iter<I: IntoIterator<Item = PairwiseRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PairwiseResult {
    type Item = PairwiseRecord;
    type IntoIter = std::vec::IntoIter<PairwiseRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PairwiseResult {
    type Item = &'a PairwiseRecord;
    type IntoIter = std::slice::Iter<'a, PairwiseRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Deref for PairwiseResult {
    type Target = [PairwiseRecord];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for PairwiseResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|record| writeln!(f, "{record}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_result() -> PairwiseResult {
        PairwiseResult::from(vec![
            PairwiseRecord::from_row(0, -1.5, 10),
            PairwiseRecord::from_row(1, 2.25, 7),
        ])
    }

    #[test]
    fn one_based_records() {
        let result = mock_result();
        assert_eq!(result[0].ind, 1);
        assert_eq!(result[1].ind, 2);
    }

    #[test]
    fn columns() {
        let columns = mock_result().to_columns();
        assert_eq!(columns.ind, vec![1, 2]);
        assert_eq!(columns.value, vec![-1.5, 2.25]);
        assert_eq!(columns.num_loc, vec![10, 7]);
    }

    #[test]
    fn display() {
        let want = format!(
            "{: <INDEX_FORMAT_LEN$}{DISPL_SEP}{: <VALUE_FORMAT_LEN$}{DISPL_SEP}10\n\
             {: <INDEX_FORMAT_LEN$}{DISPL_SEP}{: <VALUE_FORMAT_LEN$}{DISPL_SEP}7\n",
            1, -1.5, 2, 2.25
        );
        assert_eq!(mock_result().to_string(), want);
        assert!(PairwiseResult::header().starts_with("ind"));
    }
}
