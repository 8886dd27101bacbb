//! Action-client leaf bridging the tree to an external goal server.
//!
//! The tree never blocks on an external operation: [`ActionClient`] sends a
//! goal when its branch is activated, polls the goal's state once per tick,
//! and issues a fire-and-forget cancellation if the branch is abandoned
//! while the goal is still in flight. Exactly one goal is outstanding per
//! client instance at a time.

use std::time::Duration;

use crate::error::SetupError;
use crate::{Behavior, Status};

/// Identifier for one goal invocation, allocated by the server.
pub type GoalId = u64;

/// State of a goal as observed from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalState {
    /// Accepted but not yet being executed.
    Pending,
    /// Being executed.
    Active,
    /// Finished successfully.
    Succeeded,
    /// The server gave up on the goal.
    Aborted,
    /// Cancelled before completion.
    Preempted,
}

impl GoalState {
    /// Returns `true` if the goal can no longer change state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GoalState::Succeeded | GoalState::Aborted | GoalState::Preempted
        )
    }
}

/// Capability offered by an external goal-execution server.
///
/// All methods must return promptly: `goal_state` is a snapshot poll, and
/// `cancel` is a request whose acknowledgement is never awaited; the
/// server's actual stop time is unbounded and not the tree's concern.
pub trait GoalClient<G>: Send {
    /// Blocks until the server is reachable, up to `timeout`.
    ///
    /// Only called during one-time tree setup, never from the tick loop.
    fn wait_for_server(&self, timeout: Duration) -> bool;

    /// Submits a new goal and returns its identifier.
    fn send_goal(&mut self, goal: G) -> GoalId;

    /// Polls the current state of a previously sent goal.
    ///
    /// `None` means the server is unreachable or no longer knows the goal.
    fn goal_state(&self, id: GoalId) -> Option<GoalState>;

    /// Requests cancellation of a goal. Fire-and-forget.
    fn cancel(&mut self, id: GoalId);
}

/// Leaf owning the lifecycle of one outstanding external goal.
///
/// # Lifecycle
///
/// - `setup`: waits for the server within the setup timeout.
/// - `initialise`: sends a fresh copy of the preconfigured goal. This is the only
///   place a goal is ever sent, so re-ticking a finished node without a
///   fresh activation cannot double-send.
/// - `update`: polls and maps: `Pending`/`Active` → `Running`, `Succeeded`
///   → `Success`, `Aborted`/`Preempted`/unreachable → `Failure`.
/// - `terminate`: cancels the tracked goal iff it is not yet terminal, then
///   forgets it, so the next activation restarts from a fresh send rather
///   than resuming (cancel-and-restart preemption).
pub struct ActionClient<G, C> {
    name: String,
    status: Status,
    client: C,
    goal: G,
    active: Option<GoalId>,
}

impl<G, C> ActionClient<G, C>
where
    G: Clone + Send,
    C: GoalClient<G>,
{
    pub fn new(name: impl Into<String>, client: C, goal: G) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            client,
            goal,
            active: None,
        }
    }
}

impl<G, C> Behavior for ActionClient<G, C>
where
    G: Clone + Send,
    C: GoalClient<G>,
{
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
        if self.client.wait_for_server(timeout) {
            Ok(())
        } else {
            Err(SetupError::ServerUnavailable {
                node: self.name.clone(),
                timeout,
            })
        }
    }

    fn initialise(&mut self) {
        let id = self.client.send_goal(self.goal.clone());
        tracing::debug!(node = %self.name, goal = id, "goal sent");
        self.active = Some(id);
    }

    fn update(&mut self) -> Status {
        let Some(id) = self.active else {
            return Status::Failure;
        };
        match self.client.goal_state(id) {
            Some(GoalState::Pending | GoalState::Active) => Status::Running,
            Some(GoalState::Succeeded) => Status::Success,
            Some(GoalState::Aborted | GoalState::Preempted) => Status::Failure,
            None => {
                tracing::debug!(node = %self.name, goal = id, "goal server unreachable");
                Status::Failure
            }
        }
    }

    fn terminate(&mut self, new_status: Status) {
        if let Some(id) = self.active.take() {
            let outstanding = self
                .client
                .goal_state(id)
                .is_some_and(|state| !state.is_terminal());
            if outstanding {
                tracing::debug!(
                    node = %self.name,
                    goal = id,
                    ?new_status,
                    "cancelling outstanding goal"
                );
                self.client.cancel(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};

    #[derive(Default)]
    struct ServerState {
        next_id: GoalId,
        goals: HashMap<GoalId, GoalState>,
        cancelled: Vec<GoalId>,
        reachable: bool,
    }

    /// Hand-driven goal server: tests set each goal's state directly.
    #[derive(Clone)]
    struct FakeServer(Arc<Mutex<ServerState>>);

    impl FakeServer {
        fn new(reachable: bool) -> Self {
            Self(Arc::new(Mutex::new(ServerState {
                reachable,
                ..ServerState::default()
            })))
        }

        fn set_state(&self, id: GoalId, state: GoalState) {
            self.lock().goals.insert(id, state);
        }

        fn sent(&self) -> u64 {
            self.lock().next_id
        }

        fn cancelled(&self) -> Vec<GoalId> {
            self.lock().cancelled.clone()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, ServerState> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl GoalClient<&'static str> for FakeServer {
        fn wait_for_server(&self, _timeout: Duration) -> bool {
            self.lock().reachable
        }

        fn send_goal(&mut self, _goal: &'static str) -> GoalId {
            let mut state = self.lock();
            state.next_id += 1;
            let id = state.next_id;
            state.goals.insert(id, GoalState::Pending);
            id
        }

        fn goal_state(&self, id: GoalId) -> Option<GoalState> {
            let state = self.lock();
            if !state.reachable {
                return None;
            }
            state.goals.get(&id).copied()
        }

        fn cancel(&mut self, id: GoalId) {
            let mut state = self.lock();
            state.cancelled.push(id);
            state.goals.insert(id, GoalState::Preempted);
        }
    }

    fn client(server: &FakeServer) -> ActionClient<&'static str, FakeServer> {
        ActionClient::new("rotate", server.clone(), "rotate 360")
    }

    #[test]
    fn setup_fails_when_server_unreachable() {
        let server = FakeServer::new(false);
        let mut node = client(&server);
        let result = node.setup(Duration::from_millis(10));
        assert!(matches!(
            result,
            Err(SetupError::ServerUnavailable { .. })
        ));
    }

    #[test]
    fn goal_lifecycle_maps_to_statuses() {
        let server = FakeServer::new(true);
        let mut node = client(&server);

        assert_eq!(node.tick(), Status::Running); // Pending
        server.set_state(1, GoalState::Active);
        assert_eq!(node.tick(), Status::Running);
        server.set_state(1, GoalState::Succeeded);
        assert_eq!(node.tick(), Status::Success);
    }

    #[test]
    fn aborted_goal_fails() {
        let server = FakeServer::new(true);
        let mut node = client(&server);

        node.tick();
        server.set_state(1, GoalState::Aborted);
        assert_eq!(node.tick(), Status::Failure);
        // Already terminal: completion must not issue a cancel.
        assert!(server.cancelled().is_empty());
    }

    #[test]
    fn running_ticks_do_not_resend_goals() {
        let server = FakeServer::new(true);
        let mut node = client(&server);

        for _ in 0..5 {
            node.tick();
        }
        assert_eq!(server.sent(), 1);
    }

    #[test]
    fn preemption_cancels_and_restarts() {
        let server = FakeServer::new(true);
        let mut node = client(&server);

        assert_eq!(node.tick(), Status::Running);
        node.stop(Status::Invalid);
        assert_eq!(server.cancelled(), vec![1]);

        // Fresh activation sends a brand new goal.
        assert_eq!(node.tick(), Status::Running);
        assert_eq!(server.sent(), 2);
    }

    #[test]
    fn unreachable_server_mid_run_fails() {
        let server = FakeServer::new(true);
        let mut node = client(&server);

        node.tick();
        server.lock().reachable = false;
        assert_eq!(node.tick(), Status::Failure);
    }
}
