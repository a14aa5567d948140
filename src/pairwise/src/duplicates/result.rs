use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use crate::{DISPL_SEP, INDEX_FORMAT_LEN, COUNT_FORMAT_LEN};

/// A pair of source individuals whose genotypes mismatch at no more than the tolerated number of loci.
///  - `ind1`, `ind2`  : 1-based indices within the source matrix. `ind1 < ind2`
///  - `num_mismatch`  : number of loci where both carry a call, and calls differ.
///  - `num_loc`       : number of loci where both carry a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MismatchRecord {
    pub ind1        : usize,
    pub ind2        : usize,
    pub num_mismatch: usize,
    pub num_loc     : usize,
}

impl MismatchRecord {
    /// Build a record from 0-based row indices.
    pub(crate) fn from_rows(i: usize, j: usize, num_mismatch: usize, num_loc: usize) -> Self {
        Self{ind1: i + 1, ind2: j + 1, num_mismatch, num_loc}
    }
}

impl Display for MismatchRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <INDEX_FORMAT_LEN$}{DISPL_SEP}{: <INDEX_FORMAT_LEN$}{DISPL_SEP}{: <COUNT_FORMAT_LEN$}{DISPL_SEP}{}",
            self.ind1, self.ind2, self.num_mismatch, self.num_loc
        )
    }
}

/// Column-oriented view of a [`MismatchResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MismatchColumns {
    pub ind1        : Vec<usize>,
    pub ind2        : Vec<usize>,
    pub num_mismatch: Vec<usize>,
    pub num_loc     : Vec<usize>,
}

/// Qualifying pairs, sorted by `(ind1, ind2)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MismatchResult(Vec<MismatchRecord>);

impl MismatchResult {
    /// Column names, in `Display` order.
    pub const FIELDS: [&'static str; 4] = ["ind1", "ind2", "num_mismatch", "num_loc"];

    #[must_use]
    pub fn header() -> String {
        let [ind1, ind2, num_mismatch, num_loc] = Self::FIELDS;
        format!(
            "{ind1: <INDEX_FORMAT_LEN$}{DISPL_SEP}{ind2: <INDEX_FORMAT_LEN$}{DISPL_SEP}{num_mismatch: <COUNT_FORMAT_LEN$}{DISPL_SEP}{num_loc}"
        )
    }

    #[must_use]
    pub fn records(&self) -> &[MismatchRecord] {
        &self.0
    }

    #[must_use]
    pub fn into_records(self) -> Vec<MismatchRecord> {
        self.0
    }

    /// Append the records of a scan over a later range of outer indices.
    pub fn extend(&mut self, other: MismatchResult) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn to_columns(&self) -> MismatchColumns {
        let n = self.0.len();
        let mut columns = MismatchColumns {
            ind1        : Vec::with_capacity(n),
            ind2        : Vec::with_capacity(n),
            num_mismatch: Vec::with_capacity(n),
            num_loc     : Vec::with_capacity(n),
        };
        for record in &self.0 {
            columns.ind1.push(record.ind1);
            columns.ind2.push(record.ind2);
            columns.num_mismatch.push(record.num_mismatch);
            columns.num_loc.push(record.num_loc);
        }
        columns
    }
}

impl From<Vec<MismatchRecord>> for MismatchResult {
    fn from(records: Vec<MismatchRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<MismatchRecord> for MismatchResult {
    fn from_iter<I: IntoIterator<Item = MismatchRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MismatchResult {
    type Item = MismatchRecord;
    type IntoIter = std::vec::IntoIter<MismatchRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MismatchResult {
    type Item = &'a MismatchRecord;
    type IntoIter = std::slice::Iter<'a, MismatchRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Deref for MismatchResult {
    type Target = [MismatchRecord];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MismatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|record| writeln!(f, "{record}"))
    }
}
