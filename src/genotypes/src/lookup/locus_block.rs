use super::LookupTableError;

/// A square grid of values for a single locus, indexed `[source genotype][target genotype]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocusBlock {
    n_genos: usize,
    values : Vec<f64>,
}

impl LocusBlock {
    /// # Errors
    /// - `EmptyCardinality` if `n_genos == 0`
    /// - `BlockLength` if `values.len() != n_genos²`
    pub fn new(n_genos: usize, values: Vec<f64>) -> Result<Self, LookupTableError> {
        if n_genos == 0 {
            return Err(LookupTableError::EmptyCardinality{locus: None})
        }
        let expected = n_genos.checked_mul(n_genos).ok_or(LookupTableError::Overflow)?;
        if values.len() != expected {
            return Err(LookupTableError::BlockLength{n_genos, got: values.len()})
        }
        Ok(Self{n_genos, values})
    }

    /// Build a block from its rows. Row `s` holds the values of source genotype `s` against every target genotype.
    ///
    /// # Errors
    /// if the grid is not square, or empty.
    pub fn from_grid<R: AsRef<[f64]>>(grid: &[R]) -> Result<Self, LookupTableError> {
        let n_genos = grid.len();
        let mut values = Vec::with_capacity(n_genos * n_genos);
        for row in grid {
            values.extend_from_slice(row.as_ref());
        }
        Self::new(n_genos, values)
    }

    #[must_use]
    pub fn n_genos(&self) -> usize {
        self.n_genos
    }

    /// Row-major values of this block.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value for a (source, target) genotype pair, or `None` if either lies outside `0..n_genos`.
    #[inline]
    #[must_use]
    pub fn get(&self, source: usize, target: usize) -> Option<f64> {
        if source >= self.n_genos || target >= self.n_genos {
            return None
        }
        self.values.get(source * self.n_genos + target).copied()
    }
}
