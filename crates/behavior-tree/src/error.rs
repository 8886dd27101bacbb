//! Error types surfaced by the tree engine.
//!
//! Steady-state ticking never returns errors: per-tick faults (missing
//! blackboard keys, aborted goals, unreachable servers) are converted to
//! [`Status::Failure`](crate::Status::Failure) at the node boundary. The
//! types here cover the two places a real error can escape: one-time tree
//! setup and typed blackboard reads.

use std::time::Duration;

use thiserror::Error;

/// Failure during one-time tree setup.
///
/// Setup failures are fatal: the driver's caller is expected to abort the
/// process with a non-zero exit code rather than start ticking a tree whose
/// external dependencies are unavailable.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A goal server did not become reachable within the setup timeout.
    #[error("node `{node}`: goal server unavailable after {timeout:?}")]
    ServerUnavailable { node: String, timeout: Duration },

    /// A node failed to acquire an external resource.
    #[error("node `{node}`: {reason}")]
    Node { node: String, reason: String },
}

/// Failure reading a typed blackboard variable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlackboardError {
    /// No value has been written under this key yet.
    #[error("blackboard variable `{0}` is not set")]
    NotSet(String),

    /// A value exists under this key but was written with a different type.
    #[error("blackboard variable `{0}` holds a value of a different type")]
    WrongType(String),
}
