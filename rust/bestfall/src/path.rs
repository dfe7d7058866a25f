use crate::errors::BestFallError;
use crate::grid::{
    Coordinate,
    ElevationGrid,
};
use serde::Serialize;

/// A maximal strictly-descending walk, stored as an owned snapshot.
///
/// Once handed to the collector it is never mutated again. [`FallPath::new`]
/// is the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FallPath {
    coords: Vec<Coordinate>,
}

impl FallPath {
    /// Wraps a coordinate sequence, panics if it is empty.
    pub fn new(coords: Vec<Coordinate>) -> Self {
        assert!(!coords.is_empty(), "A fall path has at least one cell");
        Self { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always false, construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn first(&self) -> Coordinate {
        self.coords[0]
    }

    pub fn last(&self) -> Coordinate {
        self.coords[self.coords.len() - 1]
    }

    /// Elevation of the first cell minus elevation of the last cell.
    pub fn elevation_drop(&self, grid: &ElevationGrid) -> Result<i64, BestFallError> {
        let start = grid.value_at(self.first())? as i64;
        let end = grid.value_at(self.last())? as i64;
        Ok(start - end)
    }

    /// Checks adjacency, strict descent and maximality against `grid`.
    pub fn is_valid_fall(&self, grid: &ElevationGrid) -> Result<bool, BestFallError> {
        for pair in self.coords.windows(2) {
            if !pair[0].is_adjacent(&pair[1]) {
                return Ok(false);
            }
            if grid.value_at(pair[1])? >= grid.value_at(pair[0])? {
                return Ok(false);
            }
        }
        Ok(grid.descents(self.last())?.is_empty())
    }
}

impl From<FallPath> for Vec<Coordinate> {
    fn from(path: FallPath) -> Self {
        path.coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(v: &[(usize, usize)]) -> Vec<Coordinate> {
        v.iter().map(|&x| x.into()).collect()
    }

    #[test]
    fn test_drop_and_endpoints() {
        let grid = ElevationGrid::from_rows(vec![vec![9, 8], vec![6, 1]]).unwrap();
        let path = FallPath::new(coords(&[(0, 0), (0, 1), (1, 1)]));
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Coordinate::new(0, 0));
        assert_eq!(path.last(), Coordinate::new(1, 1));
        assert_eq!(path.elevation_drop(&grid).unwrap(), 8);
    }

    #[test]
    fn test_drop_does_not_overflow() {
        let grid = ElevationGrid::from_rows(vec![vec![i32::MAX, i32::MIN]]).unwrap();
        let path = FallPath::new(coords(&[(0, 0), (0, 1)]));
        assert_eq!(
            path.elevation_drop(&grid).unwrap(),
            i32::MAX as i64 - i32::MIN as i64
        );
    }

    #[test]
    fn test_validity_checks() {
        let grid = ElevationGrid::from_rows(vec![vec![9, 8], vec![6, 1]]).unwrap();
        assert!(FallPath::new(coords(&[(0, 0), (1, 0), (1, 1)]))
            .is_valid_fall(&grid)
            .unwrap());
        // Not maximal, (0, 1) can still drop to (1, 1).
        assert!(!FallPath::new(coords(&[(0, 0), (0, 1)]))
            .is_valid_fall(&grid)
            .unwrap());
        // Diagonal step.
        assert!(!FallPath::new(coords(&[(0, 0), (1, 1)]))
            .is_valid_fall(&grid)
            .unwrap());
        // Uphill step.
        assert!(!FallPath::new(coords(&[(1, 1), (0, 1)]))
            .is_valid_fall(&grid)
            .unwrap());
    }

    #[test]
    fn test_serializes_as_coordinate_list() {
        let path = FallPath::new(coords(&[(0, 0), (1, 0)]));
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(
            json,
            r#"{"coords":[{"row":0,"col":0},{"row":1,"col":0}]}"#
        );
    }

    #[test]
    #[should_panic]
    fn test_empty_path_panics() {
        let _ = FallPath::new(vec![]);
    }
}
