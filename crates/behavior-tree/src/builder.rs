//! Builder utilities for ergonomic tree construction.
//!
//! Assembling a tree directly means a lot of `Box::new(Sequence::new(...))`
//! noise; these helpers keep the tree description readable enough that the
//! nesting in source mirrors the tree shape.

use crate::Behavior;
use crate::composite::{Parallel, ParallelPolicy, Selector, Sequence};
use crate::decorator::{Remap, RemapTable};

/// Creates a boxed sequence node.
pub fn sequence(name: &str, children: Vec<Box<dyn Behavior>>) -> Box<dyn Behavior> {
    Box::new(Sequence::new(name, children))
}

/// Creates a boxed selector node, highest priority first.
pub fn selector(name: &str, children: Vec<Box<dyn Behavior>>) -> Box<dyn Behavior> {
    Box::new(Selector::new(name, children))
}

/// Creates a boxed parallel node with the given success policy.
pub fn parallel(
    name: &str,
    policy: ParallelPolicy,
    children: Vec<Box<dyn Behavior>>,
) -> Box<dyn Behavior> {
    Box::new(Parallel::new(name, policy, children))
}

/// Wraps a child so its `Success` reads as `Failure`.
pub fn success_is_failure(name: &str, child: Box<dyn Behavior>) -> Box<dyn Behavior> {
    Box::new(Remap::new(name, RemapTable::SUCCESS_IS_FAILURE, child))
}

/// Wraps a child so its `Success` reads as `Running`.
pub fn success_is_running(name: &str, child: Box<dyn Behavior>) -> Box<dyn Behavior> {
    Box::new(Remap::new(name, RemapTable::SUCCESS_IS_RUNNING, child))
}
