//! Scripted leaves shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Behavior, Status};

#[derive(Default)]
struct ProbeState {
    ticks: u32,
    terminations: Vec<Status>,
}

/// Observation handle for a [`ScriptedLeaf`] that has been boxed into a
/// composite and can no longer be inspected directly.
#[derive(Clone)]
pub(crate) struct Probe(Arc<Mutex<ProbeState>>);

impl Probe {
    /// Number of times the leaf's `update` ran.
    pub fn ticks(&self) -> u32 {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).ticks
    }

    /// Every status the leaf was terminated with, in order.
    pub fn terminations(&self) -> Vec<Status> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .terminations
            .clone()
    }
}

/// Leaf that replays a fixed status script, repeating the last entry once
/// the script is exhausted.
pub(crate) struct ScriptedLeaf {
    name: String,
    status: Status,
    script: VecDeque<Status>,
    last: Status,
    probe: Arc<Mutex<ProbeState>>,
}

impl ScriptedLeaf {
    pub fn repeating(name: &str, status: Status) -> (Self, Probe) {
        Self::scripted(name, vec![status])
    }

    pub fn scripted(name: &str, script: Vec<Status>) -> (Self, Probe) {
        assert!(!script.is_empty(), "script must not be empty");
        let last = *script.last().unwrap();
        let state = Arc::new(Mutex::new(ProbeState::default()));
        let leaf = Self {
            name: name.to_owned(),
            status: Status::Invalid,
            script: script.into(),
            last,
            probe: Arc::clone(&state),
        };
        (leaf, Probe(state))
    }
}

impl Behavior for ScriptedLeaf {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn update(&mut self) -> Status {
        let mut state = self.probe.lock().unwrap_or_else(PoisonError::into_inner);
        state.ticks += 1;
        self.script.pop_front().unwrap_or(self.last)
    }

    fn terminate(&mut self, new_status: Status) {
        let mut state = self.probe.lock().unwrap_or_else(PoisonError::into_inner);
        state.terminations.push(new_status);
    }
}
