use log::trace;

mod error;
pub use error::LookupTableError;

mod locus_block;
pub use locus_block::LocusBlock;

/// Precomputed, locus-partitioned values for every (source genotype, target genotype) pair.
///
/// Values are stored within a single flat vector. For locus `j`, the block of values spans
/// `starts[j] .. starts[j] + n_genos[j]²`, and is laid out as a row-major `n_genos[j] x n_genos[j]`
/// grid, indexed `[source genotype][target genotype]`. The table is directional: `[s][t]` and `[t][s]`
/// need not be equal.
///
/// Every block is guaranteed to lie within the flat vector once the table is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    values : Vec<f64>,
    n_genos: Vec<usize>,
    starts : Vec<usize>,
}

impl LookupTable {
    /// Build a lookup table from its flat representation.
    ///
    /// # Errors
    /// - `MetadataLength` if `n_genos` and `starts` differ in length.
    /// - `EmptyCardinality` if any locus has zero genotypes.
    /// - `BlockOutOfRange` if any locus block exceeds the length of `values`.
    pub fn new(values: Vec<f64>, n_genos: Vec<usize>, starts: Vec<usize>) -> Result<Self, LookupTableError> {
        use LookupTableError::{MetadataLength, EmptyCardinality, BlockOutOfRange, Overflow};
        if n_genos.len() != starts.len() {
            return Err(MetadataLength{n_genos: n_genos.len(), starts: starts.len()})
        }

        for (locus, (&n, &start)) in n_genos.iter().zip(starts.iter()).enumerate() {
            if n == 0 {
                return Err(EmptyCardinality{locus: Some(locus)})
            }
            let end = n.checked_mul(n)
                .and_then(|size| start.checked_add(size))
                .ok_or(Overflow)?;
            if end > values.len() {
                return Err(BlockOutOfRange{locus, start, end, len: values.len()})
            }
        }
        trace!("Lookup table: {} loci, {} values", n_genos.len(), values.len());
        Ok(Self{values, n_genos, starts})
    }

    /// Build a lookup table from per-locus blocks, laid out contiguously in locus order.
    ///
    /// # Errors
    /// - `Overflow` if the total number of values cannot be addressed.
    pub fn from_blocks<I>(blocks: I) -> Result<Self, LookupTableError>
    where   I: IntoIterator<Item = LocusBlock>
    {
        let mut values  = Vec::new();
        let mut n_genos = Vec::new();
        let mut starts  = Vec::new();
        for block in blocks {
            starts.push(values.len());
            n_genos.push(block.n_genos());
            values.extend_from_slice(block.values());
        }
        Self::new(values, n_genos, starts)
    }

    /// Number of loci described by this table.
    #[must_use]
    pub fn n_loci(&self) -> usize {
        self.n_genos.len()
    }

    /// Genotype cardinality of every locus.
    #[must_use]
    pub fn n_genos(&self) -> &[usize] {
        &self.n_genos
    }

    /// Offset of each locus block within the flat values.
    #[must_use]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Flat values of the table.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Offset of the (`source`, `target`) genotype pair value at `locus` within the flat values.
    ///
    /// Returns `None` if the locus does not exist, if either genotype lies outside of the locus cardinality,
    /// or if the resulting offset falls outside of the flat values.
    #[inline]
    #[must_use]
    pub fn offset(&self, locus: usize, source: usize, target: usize) -> Option<usize> {
        let n = *self.n_genos.get(locus)?;
        if source >= n || target >= n {
            return None
        }
        let offset = self.starts[locus] + n * source + target;
        (offset < self.values.len()).then_some(offset)
    }

    /// Checked access to the value of the (`source`, `target`) genotype pair at `locus`.
    #[inline]
    #[must_use]
    pub fn value(&self, locus: usize, source: usize, target: usize) -> Option<f64> {
        self.offset(locus, source, target).map(|offset| self.values[offset])
    }

    /// Copy the block of a given locus.
    #[must_use]
    pub fn block(&self, locus: usize) -> Option<LocusBlock> {
        let n     = *self.n_genos.get(locus)?;
        let start = self.starts[locus];
        let values = self.values[start..start + n * n].to_vec();
        LocusBlock::new(n, values).ok()
    }
}
