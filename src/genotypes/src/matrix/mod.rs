use std::fmt::{self, Display, Formatter};

mod error;
pub use error::GenotypeMatrixError;

/// Canonical sentinel for a missing genotype call. Any negative code is treated as missing.
pub const MISSING: i32 = -1;

/// Whether a genotype code carries an actual call (i.e. is non-negative).
#[inline(always)]
#[must_use]
pub fn is_called(code: i32) -> bool {
    code >= 0
}

/// A dense, row-major matrix of genotype codes.
///  - one row per individual.
///  - one column per locus.
///  - codes `>= 0` are genotype classes, codes `< 0` denote missing data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenotypeMatrix {
    n_rows: usize,
    n_cols: usize,
    codes : Vec<i32>,
}

impl GenotypeMatrix {
    /// Build a matrix from a flat, row-major vector of codes.
    ///
    /// # Errors
    /// - `FlatLength` if `codes.len() != n_rows * n_cols`
    pub fn new(n_rows: usize, n_cols: usize, codes: Vec<i32>) -> Result<Self, GenotypeMatrixError> {
        let expected = n_rows.checked_mul(n_cols)
            .ok_or(GenotypeMatrixError::Overflow{n_rows, n_cols})?;
        if codes.len() != expected {
            return Err(GenotypeMatrixError::FlatLength{n_rows, n_cols, got: codes.len()})
        }
        Ok(Self{n_rows, n_cols, codes})
    }

    /// Build a matrix from individual rows.
    ///
    /// An empty iterator yields a `0 x 0` matrix; use [`GenotypeMatrix::empty`] to specify a locus count.
    ///
    /// # Errors
    /// - `RaggedRow` if any row does not carry as many loci as the first one.
    pub fn from_rows<R, I>(rows: I) -> Result<Self, GenotypeMatrixError>
    where   I: IntoIterator<Item = R>,
            R: AsRef<[i32]>,
    {
        let mut rows = rows.into_iter().peekable();
        let n_cols = rows.peek().map_or(0, |row| row.as_ref().len());
        let mut codes = Vec::new();
        let mut n_rows = 0;
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(GenotypeMatrixError::RaggedRow{row: n_rows, expected: n_cols, got: row.len()})
            }
            codes.extend_from_slice(row);
            n_rows += 1;
        }
        Ok(Self{n_rows, n_cols, codes})
    }

    /// A matrix with no individuals, but a defined number of loci.
    #[must_use]
    pub fn empty(n_cols: usize) -> Self {
        Self{n_rows: 0, n_cols, codes: Vec::new()}
    }

    /// Number of individuals.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of loci.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Genotype codes of the `row`-th (0-based) individual, in locus order.
    ///
    /// # Panics
    /// if `row >= self.n_rows()`
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[i32] {
        assert!(row < self.n_rows, "row index {row} out of range for a matrix of {} rows", self.n_rows);
        let start = row * self.n_cols;
        &self.codes[start..start + self.n_cols]
    }

    /// Checked access to the `row`-th individual.
    #[must_use]
    pub fn get_row(&self, row: usize) -> Option<&[i32]> {
        (row < self.n_rows).then(|| self.row(row))
    }

    /// Iterate over every individual, in row order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        // chunks_exact() panics on a zero chunk size.
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Genotype call at (`row`, `locus`). Returns `None` for missing data or out of range coordinates.
    #[must_use]
    pub fn get(&self, row: usize, locus: usize) -> Option<u32> {
        if locus >= self.n_cols {
            return None
        }
        let code = *self.get_row(row)?.get(locus)?;
        u32::try_from(code).ok()
    }

    /// Raw codes, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.codes
    }

    /// Indices of the loci where the `row`-th individual carries a genotype call.
    ///
    /// # Panics
    /// if `row >= self.n_rows()`
    #[must_use]
    pub fn called_loci(&self, row: usize) -> Vec<usize> {
        self.row(row).iter()
            .enumerate()
            .filter_map(|(locus, &code)| is_called(code).then_some(locus))
            .collect()
    }

    /// Proportion of missing calls for the `row`-th individual. `0.0` when the matrix has no loci.
    ///
    /// # Panics
    /// if `row >= self.n_rows()` and the matrix carries at least one locus.
    #[must_use]
    pub fn missing_rate(&self, row: usize) -> f64 {
        if self.n_cols == 0 {
            return 0.0
        }
        let missing = self.row(row).iter().filter(|&&code| !is_called(code)).count();
        missing as f64 / self.n_cols as f64
    }

    /// Ensure `self` and `other` describe the same number of loci.
    ///
    /// # Errors
    /// - `LocusCountMismatch` if column counts differ.
    pub fn check_same_loci(&self, other: &Self) -> Result<(), GenotypeMatrixError> {
        if self.n_cols != other.n_cols {
            return Err(GenotypeMatrixError::LocusCountMismatch{left: self.n_cols, right: other.n_cols})
        }
        Ok(())
    }
}

impl Display for GenotypeMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut codes = row.iter();
            if let Some(first) = codes.next() {
                write!(f, "{first}")?;
            }
            for code in codes {
                write!(f, "\t{code}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
