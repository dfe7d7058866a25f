//! Exhaustive enumeration of the maximal descending paths from one landing site.
//!
//! Every frontier entry owns a handle to a persistent, append-only history.
//! Siblings share their common prefix through `Rc` and extending one branch
//! allocates a new node, so no branch can observe another branch's steps.
//! Strict descent rules out cycles, which bounds the depth by the cell count
//! without a visited set.

use crate::collector::PathCollector;
use crate::errors::BestFallError;
use crate::grid::{
    Coordinate,
    ElevationGrid,
};
use crate::path::FallPath;
use std::rc::Rc;
use tracing::debug;

/// Paths are handed to the shared collector in batches of this size.
const FLUSH_BATCH_SIZE: usize = 64;

#[derive(Debug)]
struct HistoryNode {
    coord: Coordinate,
    depth: usize,
    parent: Option<Rc<HistoryNode>>,
}

impl HistoryNode {
    fn root(coord: Coordinate) -> Rc<Self> {
        Rc::new(Self {
            coord,
            depth: 1,
            parent: None,
        })
    }

    fn extend(self: &Rc<Self>, coord: Coordinate) -> Rc<Self> {
        Rc::new(Self {
            coord,
            depth: self.depth + 1,
            parent: Some(Rc::clone(self)),
        })
    }

    /// Copies the history out into an owned path, first step first.
    fn snapshot(self: &Rc<Self>) -> FallPath {
        let mut coords = Vec::with_capacity(self.depth);
        let mut current = Some(self);
        while let Some(node) = current {
            coords.push(node.coord);
            current = node.parent.as_ref();
        }
        coords.reverse();
        FallPath::new(coords)
    }
}

pub struct PathExplorer<'a> {
    grid: &'a ElevationGrid,
}

impl<'a> PathExplorer<'a> {
    pub fn new(grid: &'a ElevationGrid) -> Self {
        Self { grid }
    }

    /// Walks every strictly-descending branch from `start` and appends each
    /// maximal path to `sink`. Returns how many paths were emitted.
    ///
    /// Only complete paths are ever handed over. On error the paths still
    /// buffered for this root are discarded and the caller fails the run.
    pub fn explore(&self, start: Coordinate, sink: &PathCollector) -> Result<usize, BestFallError> {
        // Surface a bad landing site before any work is done.
        self.grid.value_at(start)?;

        let mut emitted = 0;
        let mut buffer = Vec::with_capacity(FLUSH_BATCH_SIZE);
        let mut frontier = vec![HistoryNode::root(start)];

        while let Some(history) = frontier.pop() {
            debug_assert!(history.depth <= self.grid.len());
            let candidates = self.grid.descents(history.coord)?;
            if candidates.is_empty() {
                buffer.push(history.snapshot());
                emitted += 1;
                if buffer.len() >= FLUSH_BATCH_SIZE {
                    sink.extend(std::mem::take(&mut buffer));
                }
                continue;
            }
            // Reversed so the first neighbor is explored first, like a plain recursion would.
            for next in candidates.into_iter().rev() {
                frontier.push(history.extend(next));
            }
        }

        sink.extend(buffer);
        debug!("Landing site {} yielded {} maximal paths", start, emitted);
        Ok(emitted)
    }
}
