//! Boolean sparsity matrices
//!
//! A `BooleanMatrix` is the read-only input of a coloring run. The text format
//! is one row per line, where every decimal digit is one entry (`0` is false,
//! any other digit is true) and every other character is ignored:
//!
//! ```text
//! 1 1 0
//! 0,1,1
//! ```

use crate::{ColoringError, Result};
use std::fmt;
use std::path::Path;

/// Dense row-major boolean matrix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BooleanMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BooleanMatrix {
    /// Creates a matrix from row-major cells
    ///
    /// Fails if `cells.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(ColoringError::InvalidArgument(format!(
                "{} cells do not fill a {}x{} matrix",
                cells.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Creates an empty 0x0 matrix
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a matrix from a list of rows
    ///
    /// All rows must have the width of the first one; the first ragged row is
    /// reported as `MalformedInput` with its 1-based position.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * cols);

        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ColoringError::MalformedInput {
                    line: idx + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the matrix has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the entry at `(row, col)`
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.rows && col < self.cols,
            "position ({row}, {col}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// Returns one row as a slice
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the entries of one column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = bool> + '_ {
        assert!(col < self.cols, "column {col} outside {} columns", self.cols);
        (0..self.rows).map(move |row| self.cells[row * self.cols + col])
    }

    /// Number of true entries
    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Returns the transposed matrix
    pub fn transpose(&self) -> BooleanMatrix {
        let mut cells = Vec::with_capacity(self.cells.len());
        for col in 0..self.cols {
            cells.extend(self.column(col));
        }
        BooleanMatrix {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Returns true if columns `a` and `b` are both true in some row
    pub fn columns_intersect(&self, a: usize, b: usize) -> bool {
        self.column(a).zip(self.column(b)).any(|(x, y)| x && y)
    }

    /// Returns true if rows `a` and `b` are both true in some column
    pub fn rows_intersect(&self, a: usize, b: usize) -> bool {
        self.row(a)
            .iter()
            .zip(self.row(b))
            .any(|(&x, &y)| x && y)
    }
}

impl fmt::Display for BooleanMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for &cell in self.row(row) {
                write!(f, "{}", if cell { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a sparsity pattern from text
///
/// Each ASCII digit `0`-`9` is one entry; every other character, including
/// digits from other scripts, is ignored. Lines without any digit are skipped, so blank lines and a trailing newline
/// do not produce empty rows.
pub fn parse_matrix(text: &str) -> Result<BooleanMatrix> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut expected: Option<usize> = None;

    for (idx, line) in text.lines().enumerate() {
        let row: Vec<bool> = line
            .chars()
            .filter(|c| c.is_ascii_digit())
            .map(|c| c != '0')
            .collect();

        if row.is_empty() {
            continue;
        }

        match expected {
            None => expected = Some(row.len()),
            Some(width) if width != row.len() => {
                return Err(ColoringError::MalformedInput {
                    line: idx + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    BooleanMatrix::from_rows(&rows)
}

/// Reads and parses a sparsity pattern file
pub fn read_matrix(path: impl AsRef<Path>) -> Result<BooleanMatrix> {
    let text = std::fs::read_to_string(path)?;
    parse_matrix(&text)
}
