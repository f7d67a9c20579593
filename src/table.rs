use rand::Rng;

// A (rows x dims) table of word vectors kept in a single contiguous array.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    data: Vec<f64>, // row-major, rows * dims values
    rows: usize,
    dims: usize,
}

impl EmbeddingTable {
    pub fn zeros(rows: usize, dims: usize) -> Self {
        EmbeddingTable {
            data: vec![0.0; rows * dims],
            rows,
            dims,
        }
    }

    /// Every value is drawn uniformly from [0, 1) and shifted by -0.5.
    pub fn random<R: Rng + ?Sized>(rows: usize, dims: usize, rng: &mut R) -> Self {
        let mut table = Self::zeros(rows, dims);
        for val in table.data.iter_mut() {
            *val = rng.random::<f64>() - 0.5;
        }
        table
    }

    /// Builds a table from explicit rows, mostly useful in tests.
    /// Returns None if the rows do not all share the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let dims = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != dims) {
            return None;
        }
        Some(EmbeddingTable {
            data: rows.concat(),
            rows: rows.len(),
            dims,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.dims)
    }

    pub fn row(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.dims..(idx + 1) * self.dims]
    }

    pub fn row_mut(&mut self, idx: usize) -> &mut [f64] {
        &mut self.data[idx * self.dims..(idx + 1) * self.dims]
    }

    /// row[idx] += scale * v
    pub fn add_scaled(&mut self, idx: usize, scale: f64, v: &[f64]) {
        for (w, x) in self.row_mut(idx).iter_mut().zip(v) {
            *w += scale * x;
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_values_are_centered_on_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = EmbeddingTable::random(50, 4, &mut rng);
        assert_eq!(table.shape(), (50, 4));
        assert!(table.as_slice().iter().all(|v| (-0.5..0.5).contains(v)));
        let mean = table.as_slice().iter().sum::<f64>() / 200.0;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn empty_table_has_no_rows() {
        let table = EmbeddingTable::zeros(0, 2);
        assert_eq!(table.shape(), (0, 2));
        assert_eq!(table.iter_rows().count(), 0);
    }

    #[test]
    fn add_scaled_touches_only_one_row() {
        let mut table = EmbeddingTable::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        table.add_scaled(1, 0.5, &[2.0, -2.0]);
        assert_eq!(table.row(0), &[1.0, 2.0]);
        assert_eq!(table.row(1), &[4.0, 3.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(EmbeddingTable::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_none());
    }
}
