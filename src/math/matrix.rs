use rand::Rng;
use std::f64::consts::PI;

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from its rows. All rows must have the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows must all have the same length"
        );
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // (0, 1] keeps ln() finite.
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Samples every entry from N(0, std_dev²).
    ///
    /// For a weight matrix of shape (next layer, previous layer) the caller
    /// passes `1 / sqrt(cols)`, i.e. the inverse square root of the fan-in.
    pub fn gaussian<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    /// Matrix-vector product `self · v`.
    pub fn dot_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.cols, v.len(), "Matrices are of incorrect sizes");
        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Product with the transpose, `selfᵀ · v`, without materialising the transpose.
    pub fn transpose_dot_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.rows, v.len(), "Matrices are of incorrect sizes");
        let mut res = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += w * scale;
            }
        }
        res
    }

    /// In-place rank-one update: `self += factor * (col ⊗ rowᵀ)`.
    ///
    /// `col` has one entry per row, `row` one entry per column.
    pub fn add_scaled_outer(&mut self, factor: f64, col: &[f64], row: &[f64]) {
        assert_eq!(self.rows, col.len(), "Matrices are of incorrect sizes");
        assert_eq!(self.cols, row.len(), "Matrices are of incorrect sizes");
        for (dst, &c) in self.data.iter_mut().zip(col) {
            let scaled = factor * c;
            for (w, &r) in dst.iter_mut().zip(row) {
                *w += scaled * r;
            }
        }
    }
}
