use crate::grid::Coordinate;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BestFallError {
    /// A coordinate query landed outside the grid.
    /// Neighbor generation checks bounds, so this is an invariant violation.
    OutOfBounds {
        coord: Coordinate,
        rows: usize,
        cols: usize,
    },
    EmptyGrid,
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidConfig(String),
    ThreadPool(String),
    GridLoad(GridLoadError),
}

impl Display for BestFallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { coord, rows, cols } => write!(
                f,
                "Coordinate {} is outside of the {}x{} grid",
                coord, rows, cols
            ),
            Self::EmptyGrid => write!(f, "The grid must have at least one row and one column"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Expected {} elevation values, found {}",
                expected, found
            ),
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} columns, expected {}",
                row, found, expected
            ),
            Self::InvalidConfig(msg) => write!(f, "Invalid exploration config: {}", msg),
            Self::ThreadPool(msg) => write!(f, "Unable to build the worker pool: {}", msg),
            Self::GridLoad(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BestFallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GridLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridLoadError> for BestFallError {
    fn from(e: GridLoadError) -> Self {
        BestFallError::GridLoad(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for BestFallError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        BestFallError::ThreadPool(e.to_string())
    }
}

/// Failures while reading a grid from its textual representation.
///
/// Line numbers are 1-based and refer to the source text, header included.
#[derive(Debug)]
pub enum GridLoadError {
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    MissingHeader,
    InvalidHeader {
        line: String,
    },
    InvalidCell {
        line: usize,
        token: String,
    },
    RowCountMismatch {
        expected: usize,
        found: usize,
    },
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    EmptyGrid,
}

impl Display for GridLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { source, path } => {
                write!(f, "Error reading file {}: {}", path.display(), source)
            }
            Self::MissingHeader => write!(
                f,
                "Missing size header, the first line must contain the matrix size"
            ),
            Self::InvalidHeader { line } => write!(
                f,
                "There is a problem with the size indication '{}', the first line must contain exactly two sizes",
                line
            ),
            Self::InvalidCell { line, token } => {
                write!(f, "Invalid elevation '{}' on line {}", token, line)
            }
            Self::RowCountMismatch { expected, found } => write!(
                f,
                "Data doesn't match with the given size: expected {} rows, found {}",
                expected, found
            ),
            Self::ColumnCountMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "Data doesn't match with the given size: row {} has {} columns, expected {}",
                row, found, expected
            ),
            Self::EmptyGrid => write!(f, "The declared grid size must be at least 1x1"),
        }
    }
}

impl std::error::Error for GridLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
