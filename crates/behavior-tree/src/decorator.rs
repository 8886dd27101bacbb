//! Status-remapping decorator.
//!
//! A decorator wraps exactly one child, ticks it unconditionally, and
//! remaps the returned status through an explicit [`RemapTable`] before
//! reporting its own. The two tables used in practice:
//!
//! - [`RemapTable::SUCCESS_IS_FAILURE`] turns a "condition holds" leaf into
//!   a signal that aborts a selector's normal branch, forcing fallback
//!   behavior (e.g. a battery emergency branch that must never let the
//!   selector resolve).
//! - [`RemapTable::SUCCESS_IS_RUNNING`] keeps a one-shot condition's branch
//!   selected for exactly the tick it fires, without claiming failure
//!   (the preempt re-check in the scan branch).

use std::time::Duration;

use crate::error::SetupError;
use crate::{Behavior, Status};

/// Mapping from a child's returned status to the decorator's status.
///
/// `Invalid` never escapes a child's `tick`, so only the three live
/// statuses are remappable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapTable {
    pub on_success: Status,
    pub on_failure: Status,
    pub on_running: Status,
}

impl RemapTable {
    /// Child `Success` becomes `Failure`; other statuses pass through.
    pub const SUCCESS_IS_FAILURE: Self = Self {
        on_success: Status::Failure,
        on_failure: Status::Failure,
        on_running: Status::Running,
    };

    /// Child `Success` becomes `Running`; other statuses pass through.
    pub const SUCCESS_IS_RUNNING: Self = Self {
        on_success: Status::Running,
        on_failure: Status::Failure,
        on_running: Status::Running,
    };

    fn apply(self, status: Status) -> Status {
        match status {
            Status::Success => self.on_success,
            Status::Failure => self.on_failure,
            Status::Running => self.on_running,
            Status::Invalid => Status::Failure,
        }
    }
}

/// Wraps one child and remaps its status through a [`RemapTable`].
pub struct Remap {
    name: String,
    status: Status,
    table: RemapTable,
    child: Box<dyn Behavior>,
}

impl Remap {
    pub fn new(name: impl Into<String>, table: RemapTable, child: Box<dyn Behavior>) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            table,
            child,
        }
    }
}

impl Behavior for Remap {
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
        self.child.setup(timeout)
    }

    fn update(&mut self) -> Status {
        let status = self.child.tick();
        self.table.apply(status)
    }

    fn terminate(&mut self, _new_status: Status) {
        if self.child.status().is_running() {
            self.child.stop(Status::Invalid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLeaf;

    #[test]
    fn success_is_failure_remaps_success() {
        let (leaf, _) = ScriptedLeaf::repeating("ok", Status::Success);
        let mut node = Remap::new("guard", RemapTable::SUCCESS_IS_FAILURE, Box::new(leaf));

        assert_eq!(node.tick(), Status::Failure);
    }

    #[test]
    fn success_is_failure_passes_running_through() {
        let (leaf, _) = ScriptedLeaf::repeating("busy", Status::Running);
        let mut node = Remap::new("guard", RemapTable::SUCCESS_IS_FAILURE, Box::new(leaf));

        assert_eq!(node.tick(), Status::Running);
    }

    #[test]
    fn success_is_running_keeps_branch_selected() {
        let (leaf, probe) =
            ScriptedLeaf::scripted("oneshot", vec![Status::Success, Status::Failure]);
        let mut node = Remap::new("recheck", RemapTable::SUCCESS_IS_RUNNING, Box::new(leaf));

        assert_eq!(node.tick(), Status::Running);
        // Once consumed, the wrapped condition fails and so does the remap.
        assert_eq!(node.tick(), Status::Failure);
        assert_eq!(probe.ticks(), 2);
    }

    #[test]
    fn terminate_reaches_a_running_child() {
        let (leaf, probe) = ScriptedLeaf::repeating("busy", Status::Running);
        let mut node = Remap::new("guard", RemapTable::SUCCESS_IS_FAILURE, Box::new(leaf));

        node.tick();
        node.stop(Status::Invalid);
        assert_eq!(probe.terminations(), vec![Status::Invalid]);
    }
}
