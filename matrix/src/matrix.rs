use std::fmt::{self, Display};

use crate::{RotateError, RotateResult};

/// A `rows x cols` matrix stored row-major in one contiguous buffer:
/// cell `(r, c)` lives at `r * cols + c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T = i32> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Check that a buffer of `len` cells can hold a `rows x cols` matrix.
#[inline]
pub fn check_shape(len: usize, rows: usize, cols: usize) -> RotateResult<()> {
    if rows == 0 || cols == 0 {
        return Err(RotateError::InvalidDimensions { rows, cols });
    }
    let expected = rows
        .checked_mul(cols)
        .ok_or(RotateError::InvalidDimensions { rows, cols })?;
    if len != expected {
        return Err(RotateError::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

impl<T: Copy> Matrix<T> {
    #[inline]
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> RotateResult<Self> {
        check_shape(data.len(), rows, cols)?;
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix cell by cell, in row-major order.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> RotateResult<Self> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
            return Err(RotateError::InvalidDimensions { rows, cols });
        }
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| f(r, c))
            .collect();
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    // a validated matrix always holds at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> RotateResult<&[T]> {
        if row >= self.rows {
            return Err(RotateError::IndexOutOfRange {
                index: row,
                bound: self.rows,
            });
        }
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn column(&self, col: usize) -> RotateResult<Vec<T>> {
        if col >= self.cols {
            return Err(RotateError::IndexOutOfRange {
                index: col,
                bound: self.cols,
            });
        }
        Ok(self.data.iter().skip(col).step_by(self.cols).copied().collect())
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl Matrix<i32> {
    /// Every cell of row `i` holds `i + 1`.
    pub fn filled_by_row(rows: usize, cols: usize) -> RotateResult<Self> {
        let rows_i32 =
            i32::try_from(rows).map_err(|_| RotateError::InvalidDimensions { rows, cols })?;
        if rows_i32 == i32::MAX {
            return Err(RotateError::InvalidDimensions { rows, cols });
        }
        Self::from_fn(rows, cols, |r, _| r as i32 + 1)
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                write!(f, "{}", first)?;
            }
            for cell in cells {
                write!(f, " {}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
