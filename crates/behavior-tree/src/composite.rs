//! Composite behavior nodes.
//!
//! Composites control how a tick propagates to multiple children and how
//! their statuses aggregate back up: [`Sequence`] (AND logic with memory),
//! [`Selector`] (priority-ordered fallback with preemption), and
//! [`Parallel`] (tick everything, aggregate under a policy).
//!
//! All three tick children in declaration order on the single tick thread;
//! `Parallel` is about status aggregation, not execution concurrency. A
//! child abandoned while `Running` is always stopped with
//! [`Status::Invalid`] so it releases in-flight resources.

use std::time::Duration;

use crate::error::SetupError;
use crate::{Behavior, Status};

fn setup_children(
    children: &mut [Box<dyn Behavior>],
    timeout: Duration,
) -> Result<(), SetupError> {
    for child in children {
        child.setup(timeout)?;
    }
    Ok(())
}

fn stop_running_children(children: &mut [Box<dyn Behavior>]) {
    for child in children {
        if child.status().is_running() {
            child.stop(Status::Invalid);
        }
    }
}

/// Ticks children in fixed order until one fails or all succeed.
///
/// # Semantics
///
/// A `Sequence` remembers which child it is up to across ticks: while child
/// `i` is `Running`, later children are not ticked and earlier children are
/// not re-evaluated. Within one activation:
/// - child `Failure` → the sequence returns `Failure` immediately, stopping
///   any later child still `Running` from a previous pass
/// - child `Running` → the sequence returns `Running`
/// - all children `Success` → the sequence returns `Success`
pub struct Sequence {
    name: String,
    status: Status,
    children: Vec<Box<dyn Behavior>>,
    current: usize,
}

impl Sequence {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            name: name.into(),
            status: Status::Invalid,
            children,
            current: 0,
        }
    }
}

impl Behavior for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        setup_children(&mut self.children, timeout)
    }

    fn initialise(&mut self) {
        self.current = 0;
    }

    fn update(&mut self) -> Status {
        while self.current < self.children.len() {
            match self.children[self.current].tick() {
                Status::Running => return Status::Running,
                Status::Failure => {
                    stop_running_children(&mut self.children[self.current + 1..]);
                    return Status::Failure;
                }
                // Invalid cannot escape tick(); treat it as a fault.
                Status::Invalid => return Status::Failure,
                Status::Success => self.current += 1,
            }
        }
        Status::Success
    }

    fn terminate(&mut self, _new_status: Status) {
        stop_running_children(&mut self.children);
    }
}

/// Priority-ordered fallback: ticks children until one succeeds or runs.
///
/// # Semantics
///
/// A `Selector` re-scans from its first child on *every* tick, even when a
/// lower-priority child was `Running` last tick. This is what implements
/// preemption: a higher-priority child becoming eligible again interrupts a
/// running lower-priority sibling, which is stopped with
/// [`Status::Invalid`] before the tick completes. If every child returns
/// `Failure`, the selector returns `Failure`.
pub struct Selector {
    name: String,
    status: Status,
    children: Vec<Box<dyn Behavior>>,
}

impl Selector {
    /// Creates a new selector with the given child behaviors, highest
    /// priority first.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            name: name.into(),
            status: Status::Invalid,
            children,
        }
    }
}

impl Behavior for Selector {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        setup_children(&mut self.children, timeout)
    }

    fn update(&mut self) -> Status {
        for index in 0..self.children.len() {
            let status = self.children[index].tick();
            if matches!(status, Status::Success | Status::Running) {
                // Lower-priority children not reached this tick may still be
                // running from the previous tick; preempt them now.
                stop_running_children(&mut self.children[index + 1..]);
                return status;
            }
        }
        Status::Failure
    }

    fn terminate(&mut self, _new_status: Status) {
        stop_running_children(&mut self.children);
    }
}

/// Success policy for a [`Parallel`] composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Succeed the same tick any child succeeds.
    SuccessOnOne,
    /// Succeed once every child has succeeded.
    SuccessOnAll,
}

/// Ticks all children every tick and aggregates under a success policy.
///
/// # Semantics
///
/// Every child is ticked each cycle regardless of the others' results.
/// A single child `Failure` fails the whole parallel. Otherwise the result
/// follows the [`ParallelPolicy`]. On reaching a terminal status, children
/// still `Running` are stopped the same tick; this is how a completed
/// sibling cancels an unfinished action running alongside it.
pub struct Parallel {
    name: String,
    status: Status,
    policy: ParallelPolicy,
    children: Vec<Box<dyn Behavior>>,
}

impl Parallel {
    /// Creates a new parallel with the given policy and child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(
        name: impl Into<String>,
        policy: ParallelPolicy,
        children: Vec<Box<dyn Behavior>>,
    ) -> Self {
        assert!(
            !children.is_empty(),
            "Parallel must have at least one child"
        );
        Self {
            name: name.into(),
            status: Status::Invalid,
            policy,
            children,
        }
    }
}

impl Behavior for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn setup(&mut self, timeout: Duration) -> Result<(), SetupError> {
        setup_children(&mut self.children, timeout)
    }

    fn update(&mut self) -> Status {
        let mut successes = 0;
        let mut failures = 0;
        for child in &mut self.children {
            match child.tick() {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                _ => {}
            }
        }

        let result = if failures > 0 {
            Status::Failure
        } else {
            match self.policy {
                ParallelPolicy::SuccessOnOne if successes > 0 => Status::Success,
                ParallelPolicy::SuccessOnAll if successes == self.children.len() => {
                    Status::Success
                }
                _ => Status::Running,
            }
        };

        if result.is_terminal() {
            stop_running_children(&mut self.children);
        }
        result
    }

    fn terminate(&mut self, _new_status: Status) {
        stop_running_children(&mut self.children);
    }
}
