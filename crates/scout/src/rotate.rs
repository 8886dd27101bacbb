//! Simulated rotation controller.
//!
//! Stands in for the external goal-execution server of a real robot: goals
//! progress `Pending` → `Active` → `Succeeded` on a wall-clock timetable,
//! and a cancellation marks the goal `Preempted`. State is derived from
//! elapsed time on each poll, so the server needs no background task and
//! every [`GoalClient`] call returns immediately.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use behavior_tree::{GoalClient, GoalId, GoalState};

/// How long a goal sits in `Pending` before execution starts.
const ACCEPT_DELAY: Duration = Duration::from_millis(50);

/// One rotation request.
#[derive(Clone, Debug)]
pub struct RotateGoal {
    pub degrees: f64,
}

impl Default for RotateGoal {
    fn default() -> Self {
        Self { degrees: 360.0 }
    }
}

struct GoalRecord {
    accepted_at: Instant,
    cancelled: bool,
}

#[derive(Default)]
struct ServerState {
    next_id: GoalId,
    goals: HashMap<GoalId, GoalRecord>,
}

/// Shared handle to the simulated controller; clones address the same
/// goal table.
#[derive(Clone)]
pub struct RotateServer {
    duration: Duration,
    state: Arc<Mutex<ServerState>>,
}

impl RotateServer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: Arc::new(Mutex::new(ServerState::default())),
        }
    }

    /// Total number of goals ever accepted.
    pub fn sent(&self) -> u64 {
        self.lock().next_id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GoalClient<RotateGoal> for RotateServer {
    fn wait_for_server(&self, _timeout: Duration) -> bool {
        // The simulated controller is always up.
        true
    }

    fn send_goal(&mut self, goal: RotateGoal) -> GoalId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.goals.insert(
            id,
            GoalRecord {
                accepted_at: Instant::now(),
                cancelled: false,
            },
        );
        tracing::debug!(goal = id, degrees = goal.degrees, "rotation accepted");
        id
    }

    fn goal_state(&self, id: GoalId) -> Option<GoalState> {
        let state = self.lock();
        let record = state.goals.get(&id)?;
        if record.cancelled {
            return Some(GoalState::Preempted);
        }
        let elapsed = record.accepted_at.elapsed();
        if elapsed < ACCEPT_DELAY {
            Some(GoalState::Pending)
        } else if elapsed < ACCEPT_DELAY + self.duration {
            Some(GoalState::Active)
        } else {
            Some(GoalState::Succeeded)
        }
    }

    fn cancel(&mut self, id: GoalId) {
        let mut state = self.lock();
        if let Some(record) = state.goals.get_mut(&id) {
            record.cancelled = true;
            tracing::debug!(goal = id, "rotation cancelled");
        }
    }
}
