//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, the fundamental abstraction
//! for all behavior tree nodes. Unlike a one-shot evaluator, every node
//! here carries lifecycle state across ticks: it remembers its current
//! [`Status`], is re-initialised at the start of each activation, and is
//! explicitly terminated when it is abandoned while still running.

use std::time::Duration;

use crate::Status;
use crate::error::SetupError;

/// A behavior tree node with a tick lifecycle.
///
/// # Lifecycle
///
/// 1. Constructed once at tree-build time with status [`Status::Invalid`].
/// 2. [`setup`](Behavior::setup) is called exactly once before the first
///    tick to acquire external resources (composites recurse in child
///    order). A setup failure is fatal at the driver.
/// 3. [`tick`](Behavior::tick) runs every cycle for the tree's lifetime.
///    Each *activation* (the span from a fresh tick after a non-`Running`
///    status until the next terminal status) begins with one call to
///    [`initialise`](Behavior::initialise).
/// 4. [`stop`](Behavior::stop) is called whenever the node is abandoned
///    while `Running` (preempted by a higher-priority sibling, a parallel
///    sibling finishing first, or whole-tree shutdown). It fires the
///    [`terminate`](Behavior::terminate) hook, which is the sole
///    cancellation path for in-flight external work.
pub trait Behavior: Send {
    /// Human-readable node name, used for logging and error reporting.
    fn name(&self) -> &str;

    /// The status recorded by the most recent `tick` or `stop`.
    fn status(&self) -> Status;

    /// Mutable access to the recorded status.
    ///
    /// Exists so the provided `tick`/`stop` methods can do the bookkeeping;
    /// callers should not reach for this directly.
    fn status_mut(&mut self) -> &mut Status;

    /// One-time acquisition of external resources.
    ///
    /// Composites propagate the call to every child in order and fail fast
    /// on the first child error.
    fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        let _ = timeout;
        Ok(())
    }

    /// Invoked once at the start of every fresh activation, before the
    /// first `update` of that activation.
    fn initialise(&mut self) {}

    /// Computes this tick's status from current inputs.
    ///
    /// Must not block the tick thread and must never return
    /// [`Status::Invalid`]; faults are mapped to [`Status::Failure`] here
    /// rather than propagated.
    fn update(&mut self) -> Status;

    /// Release hook, invoked by [`stop`](Behavior::stop) on every
    /// transition away from `Running` (natural completion included).
    ///
    /// Nodes with outstanding external side effects cancel them here;
    /// composites stop any still-running children.
    fn terminate(&mut self, new_status: Status) {
        let _ = new_status;
    }

    /// Ticks this node once and returns the resulting status.
    ///
    /// This is the public entry point: it handles activation bookkeeping
    /// around [`update`](Behavior::update) and routes terminal results
    /// through [`stop`](Behavior::stop) so the `terminate` hook always
    /// fires on completion.
    fn tick(&mut self) -> Status {
        if !self.status().is_running() {
            tracing::trace!(node = self.name(), "initialise");
            self.initialise();
        }
        let new_status = self.update();
        debug_assert!(
            new_status != Status::Invalid,
            "update() must resolve to Running/Success/Failure"
        );
        if new_status.is_running() {
            *self.status_mut() = Status::Running;
        } else {
            self.stop(new_status);
        }
        new_status
    }

    /// Terminates this node with the given status.
    ///
    /// Called by parents when this node is preempted (with
    /// [`Status::Invalid`]) and by `tick` on natural completion.
    fn stop(&mut self, new_status: Status) {
        self.terminate(new_status);
        *self.status_mut() = new_status;
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior>` to also implement `Behavior`, enabling
/// heterogeneous child collections inside composites.
impl Behavior for Box<dyn Behavior> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn status(&self) -> Status {
        (**self).status()
    }

    fn status_mut(&mut self) -> &mut Status {
        (**self).status_mut()
    }

    fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        (**self).setup(timeout)
    }

    fn initialise(&mut self) {
        (**self).initialise()
    }

    fn update(&mut self) -> Status {
        (**self).update()
    }

    fn terminate(&mut self, new_status: Status) {
        (**self).terminate(new_status)
    }

    fn tick(&mut self) -> Status {
        (**self).tick()
    }

    fn stop(&mut self, new_status: Status) {
        (**self).stop(new_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        status: Status,
        result: Status,
        initialised: u32,
        updated: u32,
        terminated: Vec<Status>,
    }

    impl Counting {
        fn new(result: Status) -> Self {
            Self {
                status: Status::Invalid,
                result,
                initialised: 0,
                updated: 0,
                terminated: Vec::new(),
            }
        }
    }

    impl Behavior for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn status(&self) -> Status {
            self.status
        }

        fn status_mut(&mut self) -> &mut Status {
            &mut self.status
        }

        fn initialise(&mut self) {
            self.initialised += 1;
        }

        fn update(&mut self) -> Status {
            self.updated += 1;
            self.result
        }

        fn terminate(&mut self, new_status: Status) {
            self.terminated.push(new_status);
        }
    }

    #[test]
    fn initialise_runs_once_per_activation() {
        let mut node = Counting::new(Status::Running);
        assert_eq!(node.tick(), Status::Running);
        assert_eq!(node.tick(), Status::Running);
        assert_eq!(node.tick(), Status::Running);
        assert_eq!(node.initialised, 1);
        assert_eq!(node.updated, 3);
    }

    #[test]
    fn terminal_status_starts_fresh_activation() {
        let mut node = Counting::new(Status::Success);
        node.tick();
        node.tick();
        // Every tick after a terminal status is a fresh activation.
        assert_eq!(node.initialised, 2);
    }

    #[test]
    fn terminate_fires_on_natural_completion() {
        let mut node = Counting::new(Status::Failure);
        node.tick();
        assert_eq!(node.terminated, vec![Status::Failure]);
        assert_eq!(node.status(), Status::Failure);
    }

    #[test]
    fn stop_records_status_and_fires_hook() {
        let mut node = Counting::new(Status::Running);
        node.tick();
        node.stop(Status::Invalid);
        assert_eq!(node.terminated, vec![Status::Invalid]);
        assert_eq!(node.status(), Status::Invalid);
    }
}
