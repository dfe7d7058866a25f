//! Fan-out over every landing site, fan-in into one collector, then selection.

use crate::collector::PathCollector;
use crate::errors::BestFallError;
use crate::explorer::PathExplorer;
use crate::grid::ElevationGrid;
use crate::path::FallPath;
use crate::progress::{
    ProgressObserver,
    ProgressTracker,
};
use crate::selector::{
    BestFall,
    select,
};
use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};
use std::time::{
    Duration,
    Instant,
};
use tracing::{
    info,
    instrument,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Upper bound on landing sites explored at the same time.
    pub max_concurrency: usize,
    /// How often the progress sampler looks at the collector.
    pub progress_interval_ms: u64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            progress_interval_ms: 200,
        }
    }
}

impl ExplorationConfig {
    pub fn validate(&self) -> Result<(), BestFallError> {
        if self.max_concurrency == 0 {
            return Err(BestFallError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.progress_interval_ms == 0 {
            return Err(BestFallError::InvalidConfig(
                "progress_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekOutcome {
    pub best: Option<BestFall>,
    pub paths_evaluated: usize,
    pub elapsed: Duration,
}

/// Samples the collector until `done` is raised, then takes one last sample.
fn run_sampler<O: ProgressObserver + ?Sized>(
    collector: &PathCollector,
    mut tracker: ProgressTracker,
    observer: &O,
    interval: Duration,
    done: &AtomicBool,
) {
    loop {
        let finished = done.load(Ordering::Acquire);
        if let Some(event) = tracker.observe(collector.snapshot_count()) {
            observer.on_progress(&event);
        }
        if finished {
            break;
        }
        std::thread::park_timeout(interval);
    }
}

/// Enumerates every maximal descending path of `grid`.
///
/// Landing sites run on a dedicated pool of `max_concurrency` threads, each
/// root on a single worker. The returned paths are in no particular order.
/// The first failing root fails the whole run.
#[instrument(skip_all, fields(rows = grid.rows(), cols = grid.cols()))]
pub fn explore_all<O: ProgressObserver + ?Sized>(
    grid: &ElevationGrid,
    config: &ExplorationConfig,
    observer: &O,
) -> Result<Vec<FallPath>, BestFallError> {
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_concurrency)
        .thread_name(|i| format!("bestfall-explorer-{}", i))
        .build()?;
    info!(
        "Exploring {} landing sites with up to {} workers",
        grid.len(),
        config.max_concurrency
    );

    let collector = PathCollector::new();
    let explorer = PathExplorer::new(grid);
    let tracker = ProgressTracker::new(grid.rows(), grid.cols());
    let done = AtomicBool::new(false);

    let exploration = std::thread::scope(|s| {
        let sampler = s.spawn(|| {
            run_sampler(
                &collector,
                tracker,
                observer,
                config.progress_interval(),
                &done,
            )
        });

        let res = pool.install(|| {
            (0..grid.len()).into_par_iter().try_for_each(|idx| {
                explorer
                    .explore(grid.coordinate_of_index(idx), &collector)
                    .map(|_| ())
            })
        });

        done.store(true, Ordering::Release);
        sampler.thread().unpark();
        res
    });
    exploration?;

    let paths = collector.drain();
    info!("Collected {} maximal paths", paths.len());
    Ok(paths)
}

/// Explores the whole grid and returns the best fall.
pub fn find_best_fall<O: ProgressObserver + ?Sized>(
    grid: &ElevationGrid,
    config: &ExplorationConfig,
    observer: &O,
) -> Result<SeekOutcome, BestFallError> {
    let start = Instant::now();
    let paths = explore_all(grid, config, observer)?;
    let best = select(&paths, grid)?;
    Ok(SeekOutcome {
        best,
        paths_evaluated: paths.len(),
        elapsed: start.elapsed(),
    })
}
