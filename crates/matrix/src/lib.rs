use std::fmt;

use thiserror::Error;

/// Cell type for matrix elements. `i16` carries exactly the supported value
/// range [-32768, 32767], so out-of-range input fails at parse time instead
/// of wrapping.
pub type Cell = i16;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("index ({row}, {col}) is out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Dense row-major grid of bounded integers. Both extents are always at
/// least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Cell>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        })
    }

    /// 1x1 matrix holding a single value.
    pub fn from_value(value: Cell) -> Self {
        Self {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, MatrixError> {
        Ok(self.data[self.offset(row, col)?])
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<(), MatrixError> {
        let offset = self.offset(row, col)?;
        self.data[offset] = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Reallocates to `new_rows x new_cols`, keeping the overlapping top-left
    /// submatrix and zero-filling cells outside the old extent. The matrix is
    /// left untouched when either new extent is zero.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) -> Result<(), MatrixError> {
        if new_rows == 0 || new_cols == 0 {
            return Err(MatrixError::InvalidDimension {
                rows: new_rows,
                cols: new_cols,
            });
        }
        let mut data = vec![0; new_rows * new_cols];
        for row in 0..self.rows.min(new_rows) {
            for col in 0..self.cols.min(new_cols) {
                data[row * new_cols + col] = self.data[row * self.cols + col];
            }
        }
        self.rows = new_rows;
        self.cols = new_cols;
        self.data = data;
        Ok(())
    }

    /// Mean of all cells. Total, since every matrix holds at least one cell.
    pub fn average(&self) -> f64 {
        let sum: f64 = self.data.iter().map(|&value| f64::from(value)).sum();
        sum / (self.rows * self.cols) as f64
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks_exact(self.cols) {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                write!(f, "{first}")?;
            }
            for cell in cells {
                write!(f, "\t{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
