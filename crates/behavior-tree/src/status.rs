//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Reactive Semantics
///
/// The tree is re-evaluated at a fixed cadence, so a node may need more
/// than one tick to reach a result:
/// - Conditions resolve immediately (e.g., "Was the scan button pressed?")
/// - Actions report `Running` until the external operation they track
///   reaches a terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node has not been ticked in its current activation.
    ///
    /// This is the only legal initial value. It is also the status a node
    /// is stopped with when a higher-priority sibling preempts it.
    Invalid,

    /// The node needs more ticks to reach a result.
    Running,

    /// The behavior completed successfully.
    ///
    /// For conditions: the condition was met.
    /// For actions: the tracked goal reported success.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: the condition was not met (or its input was absent).
    /// For actions: the tracked goal was aborted or the server became
    /// unreachable.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Success` or `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }
}
