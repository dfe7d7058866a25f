use crate::errors::BestFallError;
use crate::grid::{
    Coordinate,
    ElevationGrid,
};
use crate::path::FallPath;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::info;

/// The winning fall together with the values a report needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestFall {
    pub path: FallPath,
    pub drop: i64,
    pub start_elevation: i32,
    pub end_elevation: i32,
}

impl BestFall {
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    pub fn coords(&self) -> &[Coordinate] {
        self.path.coords()
    }
}

/// Ranks two scored candidates, `Greater` means `a` wins.
///
/// Longer wins, then the larger drop, then the lexicographically smaller
/// coordinate sequence so the result does not depend on discovery order.
fn rank(a: (&FallPath, i64), b: (&FallPath, i64)) -> Ordering {
    a.0.len()
        .cmp(&b.0.len())
        .then(a.1.cmp(&b.1))
        .then_with(|| b.0.coords().cmp(a.0.coords()))
}

/// Picks the best fall out of `paths`, `None` when there is nothing to pick.
pub fn select(paths: &[FallPath], grid: &ElevationGrid) -> Result<Option<BestFall>, BestFallError> {
    let mut best: Option<(&FallPath, i64)> = None;
    for path in paths {
        let scored = (path, path.elevation_drop(grid)?);
        best = match best {
            Some(current) if rank(current, scored) != Ordering::Less => Some(current),
            _ => Some(scored),
        };
    }

    let Some((path, drop)) = best else {
        info!("No paths to select from");
        return Ok(None);
    };

    let out = BestFall {
        path: path.clone(),
        drop,
        start_elevation: grid.value_at(path.first())?,
        end_elevation: grid.value_at(path.last())?,
    };
    info!(
        "Best fall starts at {} with {} steps and a drop of {}",
        path.first(),
        out.steps(),
        out.drop
    );
    Ok(Some(out))
}
