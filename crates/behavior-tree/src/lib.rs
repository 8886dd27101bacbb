//! Reactive behavior tree engine.
//!
//! A tree of composable behaviors re-evaluated ("ticked") at a fixed
//! cadence to decide, on every cycle, which action branch is currently
//! authoritative. The engine is built around three rules:
//!
//! - **Statuses propagate bottom-up**: every node resolves each tick to
//!   [`Status::Running`], [`Status::Success`] or [`Status::Failure`], and
//!   composites aggregate those under their policy.
//! - **Control propagates top-down**: a [`Selector`] re-scans from its
//!   highest-priority child every tick, so a condition becoming true
//!   preempts a running lower-priority branch the same cycle.
//! - **Cancellation is cooperative and explicit**: a node abandoned while
//!   running is stopped via its `terminate` hook, which is where in-flight
//!   external goals get cancelled.
//!
//! A single logical thread drives the whole tree; the [`Parallel`]
//! composite aggregates statuses, it does not execute children
//! concurrently. Asynchronous inputs reach the tree through the shared
//! [`Blackboard`], and long-running external operations are bridged by
//! [`ActionClient`] over the [`GoalClient`] capability.
//!
//! # Architecture
//!
//! - [`Behavior`]: lifecycle contract for all nodes (setup / initialise /
//!   update / terminate)
//! - [`Status`]: per-tick result
//! - Composites: [`Sequence`], [`Selector`], [`Parallel`]
//! - Decorator: [`Remap`] with an explicit status remap table
//! - Leaves: [`CheckBlackboardVariable`], [`ActionClient`], [`Idle`],
//!   [`Timer`]
//! - [`BehaviorTree`]: fixed-period driver with orderly shutdown

pub mod action;
pub mod behavior;
pub mod blackboard;
pub mod builder;
pub mod composite;
pub mod condition;
pub mod decorator;
pub mod error;
pub mod leaves;
pub mod status;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types for ergonomic API
pub use action::{ActionClient, GoalClient, GoalId, GoalState};
pub use behavior::Behavior;
pub use blackboard::{Blackboard, Key};
pub use composite::{Parallel, ParallelPolicy, Selector, Sequence};
pub use condition::CheckBlackboardVariable;
pub use decorator::{Remap, RemapTable};
pub use error::{BlackboardError, SetupError};
pub use leaves::{Idle, Timer};
pub use status::Status;
pub use tree::{BehaviorTree, ShutdownHandle};
