use crate::errors::BestFallError;
use serde::{
    Deserialize,
    Serialize,
};

/// A cell position on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the two coordinates differ by exactly one unit on exactly one axis.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Immutable row-major matrix of elevations.
///
/// Built once before exploration and shared read-only by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationGrid {
    rows: usize,
    cols: usize,
    values: Vec<i32>,
}

impl ElevationGrid {
    /// Creates a grid from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<i32>) -> Result<Self, BestFallError> {
        if rows == 0 || cols == 0 {
            return Err(BestFallError::EmptyGrid);
        }
        // Saturates so an absurd declared size reports as a mismatch.
        let expected = rows.saturating_mul(cols);
        if values.len() != expected {
            return Err(BestFallError::DimensionMismatch {
                expected,
                found: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, BestFallError> {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let nrows = rows.len();
        let mut values = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(BestFallError::RaggedRows {
                    row: i,
                    expected: ncols,
                    found: row.len(),
                });
            }
            values.extend(row);
        }
        Self::new(nrows, ncols, values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn value_at(&self, coord: Coordinate) -> Result<i32, BestFallError> {
        if !self.is_in_bounds(coord) {
            return Err(BestFallError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.values[coord.row * self.cols + coord.col])
    }

    /// In-bounds 4-neighbors, always in the order left, right, up, down.
    ///
    /// The order fixes branch enumeration order, nothing else depends on it.
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        let Coordinate { row, col } = coord;
        let candidates = [
            col.checked_sub(1).map(|c| Coordinate::new(row, c)),
            Some(Coordinate::new(row, col + 1)),
            row.checked_sub(1).map(|r| Coordinate::new(r, col)),
            Some(Coordinate::new(row + 1, col)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |c| self.is_in_bounds(*c))
    }

    /// Neighbors with a strictly smaller elevation than `coord`.
    pub fn descents(&self, coord: Coordinate) -> Result<Vec<Coordinate>, BestFallError> {
        let current = self.value_at(coord)?;
        let mut out = Vec::with_capacity(4);
        for n in self.neighbors(coord) {
            if self.value_at(n)? < current {
                out.push(n);
            }
        }
        Ok(out)
    }

    /// Every cell, row-major. These are the landing sites.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Coordinate::new(r, c)))
    }

    pub fn coordinate_of_index(&self, index: usize) -> Coordinate {
        Coordinate::new(index / self.cols, index % self.cols)
    }
}
