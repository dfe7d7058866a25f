//! Reads an elevation grid from its textual matrix form.
//!
//! ```text
//! 4 4
//! 4 8 7 3
//! 2 5 9 3
//! 6 3 2 5
//! 4 4 1 6
//! ```
//!
//! The first line declares `rows cols`, every following non-empty line is one
//! row. The declared size must match the data exactly.

use crate::errors::{
    BestFallError,
    GridLoadError,
};
use crate::grid::ElevationGrid;
use std::path::Path;
use tracing::{
    debug,
    info,
};

/// How cells are split within a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Separator {
    /// Any run of whitespace.
    #[default]
    Whitespace,
    Char(char),
}

impl Separator {
    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Separator::Whitespace => line.split_whitespace().collect(),
            Separator::Char(c) => line
                .trim()
                .split(*c)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl From<Option<char>> for Separator {
    fn from(value: Option<char>) -> Self {
        match value {
            Some(c) if !c.is_whitespace() => Separator::Char(c),
            _ => Separator::Whitespace,
        }
    }
}

fn parse_line(
    line: &str,
    line_number: usize,
    separator: Separator,
) -> Result<Vec<i32>, GridLoadError> {
    separator
        .split(line)
        .into_iter()
        .map(|token| {
            token.parse::<i32>().map_err(|_| GridLoadError::InvalidCell {
                line: line_number,
                token: token.to_string(),
            })
        })
        .collect()
}

fn parse_header(line: &str, separator: Separator) -> Result<(usize, usize), GridLoadError> {
    let invalid = || GridLoadError::InvalidHeader {
        line: line.to_string(),
    };
    let tokens = separator.split(line);
    let [rows, cols] = tokens.as_slice() else {
        return Err(invalid());
    };
    let rows = rows.parse::<usize>().map_err(|_| invalid())?;
    let cols = cols.parse::<usize>().map_err(|_| invalid())?;
    if rows == 0 || cols == 0 {
        return Err(GridLoadError::EmptyGrid);
    }
    rows.checked_mul(cols).ok_or_else(invalid)?;
    Ok((rows, cols))
}

/// Parses a grid from text, validating declared against actual dimensions.
pub fn parse_grid(text: &str, separator: Separator) -> Result<ElevationGrid, GridLoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(GridLoadError::MissingHeader)?;
    let (rows, cols) = parse_header(header, separator)?;
    debug!("Declared grid size {}x{}", rows, cols);

    // Grows with the data, the header alone is not trusted for sizing.
    let mut values = Vec::new();
    let mut found_rows = 0;
    for (line_number, line) in lines {
        let row = parse_line(line, line_number, separator)?;
        if row.len() != cols {
            return Err(GridLoadError::ColumnCountMismatch {
                row: found_rows,
                expected: cols,
                found: row.len(),
            });
        }
        values.extend(row);
        found_rows += 1;
    }

    if found_rows != rows {
        return Err(GridLoadError::RowCountMismatch {
            expected: rows,
            found: found_rows,
        });
    }

    ElevationGrid::new(rows, cols, values).map_err(|e| match e {
        BestFallError::EmptyGrid => GridLoadError::EmptyGrid,
        _ => GridLoadError::RowCountMismatch {
            expected: rows,
            found: found_rows,
        },
    })
}

/// Reads and parses the grid file at `path`.
pub fn load_grid(path: impl AsRef<Path>, separator: Separator) -> Result<ElevationGrid, GridLoadError> {
    let path = path.as_ref();
    let st = std::time::Instant::now();
    let text = std::fs::read_to_string(path).map_err(|e| GridLoadError::Io {
        source: e,
        path: path.to_path_buf(),
    })?;
    let grid = parse_grid(&text, separator)?;
    info!(
        "Loaded {}x{} grid from {} in {:?}",
        grid.rows(),
        grid.cols(),
        path.display(),
        st.elapsed()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;

    #[test]
    fn test_parse_simple_grid() {
        let text = "2 3\n1 2 3\n4 5 6\n";
        let grid = parse_grid(text, Separator::Whitespace).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.value_at(Coordinate::new(1, 2)).unwrap(), 6);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace_and_blank_lines() {
        let text = "\n 2   2 \r\n-1  7\n\n 3\t-4\n\n";
        let grid = parse_grid(text, Separator::Whitespace).unwrap();
        assert_eq!(grid.value_at(Coordinate::new(0, 0)).unwrap(), -1);
        assert_eq!(grid.value_at(Coordinate::new(1, 1)).unwrap(), -4);
    }

    #[test]
    fn test_parse_custom_separator() {
        let text = "2,2\n1,2\n3, 4\n";
        let grid = parse_grid(text, Separator::Char(',')).unwrap();
        assert_eq!(grid.value_at(Coordinate::new(1, 1)).unwrap(), 4);
        assert_eq!(Separator::from(Some(',')), Separator::Char(','));
        assert_eq!(Separator::from(Some(' ')), Separator::Whitespace);
        assert_eq!(Separator::from(None), Separator::Whitespace);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse_grid("   \n\n", Separator::Whitespace),
            Err(GridLoadError::MissingHeader)
        ));
    }

    #[test]
    fn test_invalid_header() {
        for text in ["3\n1 2 3\n", "3 3 3\n", "a b\n", "-1 2\n"] {
            assert!(
                matches!(
                    parse_grid(text, Separator::Whitespace),
                    Err(GridLoadError::InvalidHeader { .. })
                ),
                "Expected an invalid header for {:?}",
                text
            );
        }
        assert!(matches!(
            parse_grid("0 3\n", Separator::Whitespace),
            Err(GridLoadError::EmptyGrid)
        ));
    }

    #[test]
    fn test_invalid_cell_reports_line() {
        let res = parse_grid("2 2\n1 2\n3 x\n", Separator::Whitespace);
        match res {
            Err(GridLoadError::InvalidCell { line, token }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "x");
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatches() {
        assert!(matches!(
            parse_grid("3 2\n1 2\n3 4\n", Separator::Whitespace),
            Err(GridLoadError::RowCountMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse_grid("2 2\n1 2\n3 4\n5 6\n", Separator::Whitespace),
            Err(GridLoadError::RowCountMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            parse_grid("2 2\n1 2 3\n3 4\n", Separator::Whitespace),
            Err(GridLoadError::ColumnCountMismatch {
                row: 0,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        // Product overflows usize.
        assert!(matches!(
            parse_grid("4294967296 4294967296\n1\n", Separator::Whitespace),
            Err(GridLoadError::InvalidHeader { .. })
        ));
        // Fits usize on 64-bit targets but far exceeds the data.
        assert!(matches!(
            parse_grid("3000000000 3000000000\n1\n", Separator::Whitespace),
            Err(GridLoadError::ColumnCountMismatch { .. } | GridLoadError::InvalidHeader { .. })
        ));
        assert!(matches!(
            parse_grid("3000000000 1\n1\n", Separator::Whitespace),
            Err(GridLoadError::RowCountMismatch {
                expected: 3000000000,
                found: 1
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let res = load_grid("/definitely/not/here/map.txt", Separator::Whitespace);
        assert!(matches!(res, Err(GridLoadError::Io { .. })));
    }
}
