//! Tree driver: owns the root and runs the fixed-period tick loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::SetupError;
use crate::{Behavior, Status};

/// Cloneable handle requesting shutdown of a running tick loop.
///
/// Typically handed to a signal handler; the loop finishes its current
/// tick, interrupts the tree, and returns.
#[derive(Clone)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    /// Requests that the tick loop stop after the current tick.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owns the root behavior and drives the whole tree.
pub struct BehaviorTree {
    root: Box<dyn Behavior>,
    count: u64,
    shutdown: Arc<AtomicBool>,
}

impl BehaviorTree {
    pub fn new(root: Box<dyn Behavior>) -> Self {
        Self {
            root,
            count: 0,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting shutdown from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    /// Number of ticks driven so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// One-time recursive setup of every node, in child order.
    ///
    /// An error here is fatal: the caller is expected to abort startup
    /// rather than tick a partially initialised tree.
    pub fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        tracing::info!(?timeout, "setting up tree");
        self.root.setup(timeout)
    }

    /// Ticks the root once and returns the resulting status.
    pub fn tick(&mut self) -> Status {
        self.count += 1;
        let status = self.root.tick();
        tracing::trace!(count = self.count, ?status, "tick");
        status
    }

    /// Runs the tick loop at a fixed period until shutdown is requested,
    /// then interrupts the tree.
    ///
    /// Each cycle sleeps for the remainder of the period after the tick, so
    /// the cadence does not drift with tick duration.
    pub fn tick_tock(&mut self, period: Duration) {
        tracing::info!(period_ms = period.as_millis() as u64, "tick tock");
        while !self.shutdown.load(Ordering::Relaxed) {
            let started = Instant::now();
            self.tick();
            if let Some(remaining) = period.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
        self.interrupt();
    }

    /// Recursively terminates every currently running node.
    ///
    /// Guarantees all outstanding goals are cancelled before the process
    /// exits; safe to call on an already idle tree.
    pub fn interrupt(&mut self) {
        tracing::info!("interrupting tree");
        self.root.stop(Status::Invalid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::Selector;
    use crate::testing::ScriptedLeaf;

    #[test]
    fn tick_counts_and_returns_root_status() {
        let (leaf, _) = ScriptedLeaf::repeating("leaf", Status::Running);
        let mut tree = BehaviorTree::new(Box::new(leaf));

        assert_eq!(tree.tick(), Status::Running);
        assert_eq!(tree.tick(), Status::Running);
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn interrupt_terminates_running_nodes() {
        let (leaf, probe) = ScriptedLeaf::repeating("leaf", Status::Running);
        let root = Selector::new("root", vec![Box::new(leaf) as Box<dyn Behavior>]);
        let mut tree = BehaviorTree::new(Box::new(root));

        tree.tick();
        tree.interrupt();
        assert_eq!(probe.terminations(), vec![Status::Invalid]);
    }

    #[test]
    fn tick_tock_stops_on_shutdown_request() {
        let (leaf, probe) = ScriptedLeaf::repeating("leaf", Status::Running);
        let mut tree = BehaviorTree::new(Box::new(leaf));
        let handle = tree.shutdown_handle();

        let ticker = thread::spawn(move || {
            tree.tick_tock(Duration::from_millis(1));
            tree.count()
        });
        thread::sleep(Duration::from_millis(20));
        handle.request();
        let ticks = ticker.join().expect("tick loop panicked");

        assert!(ticks > 0);
        // interrupt() ran on the way out.
        assert_eq!(probe.terminations(), vec![Status::Invalid]);
    }
}
