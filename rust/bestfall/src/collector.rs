//! Shared sink for the maximal paths found by concurrent explorers.
//!
//! Writers take a short lock to push. The running count lives in an atomic
//! so a progress observer can sample it without ever touching the lock.

use crate::path::FallPath;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::{
    Mutex,
    PoisonError,
};

#[derive(Debug, Default)]
pub struct PathCollector {
    paths: Mutex<Vec<FallPath>>,
    count: AtomicUsize,
}

impl PathCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one finished path. Safe to call from any number of threads.
    pub fn append(&self, path: FallPath) {
        let mut guard = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push(path);
        // Bumped while still holding the lock so the count never runs ahead of the data.
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Appends a batch of paths under a single lock acquisition.
    pub fn extend(&self, paths: Vec<FallPath>) {
        if paths.is_empty() {
            return;
        }
        let n = paths.len();
        let mut guard = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        guard.extend(paths);
        self.count.fetch_add(n, Ordering::Release);
    }

    /// Possibly stale size, never blocks writers.
    pub fn snapshot_count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Returns every collected path exactly once.
    ///
    /// Takes `self` by value, so it can only be called once all explorers
    /// have released their borrows, i.e. after the join.
    pub fn drain(self) -> Vec<FallPath> {
        self.paths
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
