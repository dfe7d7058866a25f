//! Exhaustive search for the best fall over a grid of elevations.
//!
//! A fall is a strictly-descending walk of 4-connected steps that cannot be
//! extended any further. The best fall is the longest one, and among the
//! longest, the one with the largest drop between its first and last cell.
//!
//! Every cell is a landing site. Each landing site is explored exhaustively
//! on its own worker, every maximal path goes into a shared collector, and the
//! winner is picked once all workers are joined.
//!
//! ```
//! use bestfall::{
//!     ElevationGrid,
//!     ExplorationConfig,
//!     NoopObserver,
//!     find_best_fall,
//! };
//!
//! let grid = ElevationGrid::from_rows(vec![vec![9, 8], vec![6, 1]]).unwrap();
//! let outcome = find_best_fall(&grid, &ExplorationConfig::default(), &NoopObserver).unwrap();
//! let best = outcome.best.unwrap();
//! assert_eq!(best.steps(), 3);
//! assert_eq!(best.drop, 8);
//! ```

pub mod collector;
pub mod engine;
pub mod errors;
pub mod explorer;
pub mod grid;
pub mod loader;
pub mod path;
pub mod progress;
pub mod report;
pub mod selector;

pub use crate::collector::PathCollector;
pub use crate::engine::{
    ExplorationConfig,
    SeekOutcome,
    explore_all,
    find_best_fall,
};
pub use crate::errors::{
    BestFallError,
    GridLoadError,
};
pub use crate::explorer::PathExplorer;
pub use crate::grid::{
    Coordinate,
    ElevationGrid,
};
pub use crate::loader::{
    Separator,
    load_grid,
    parse_grid,
};
pub use crate::path::FallPath;
pub use crate::progress::{
    NoopObserver,
    ProgressEvent,
    ProgressObserver,
    ProgressTracker,
};
pub use crate::report::{
    FallReport,
    StepReport,
};
pub use crate::selector::{
    BestFall,
    select,
};
