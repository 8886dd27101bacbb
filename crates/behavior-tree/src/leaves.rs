//! Small general-purpose leaves.

use std::time::{Duration, Instant};

use crate::{Behavior, Status};

/// Always returns `Running`.
///
/// The canonical lowest-priority fallback: keeps the tree alive when no
/// higher-priority branch is eligible.
pub struct Idle {
    name: String,
    status: Status,
}

impl Idle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
        }
    }
}

impl Behavior for Idle {
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
        Status::Running
    }
}

/// Runs for a fixed duration from activation, then succeeds.
pub struct Timer {
    name: String,
    status: Status,
    duration: Duration,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            duration,
            deadline: None,
        }
    }
}

impl Behavior for Timer {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn initialise(&mut self) {
        self.deadline = Some(Instant::now() + self.duration);
    }

    fn update(&mut self) -> Status {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Status::Success,
            Some(_) => Status::Running,
            None => Status::Failure,
        }
    }

    fn terminate(&mut self, _new_status: Status) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_runs_forever() {
        let mut idle = Idle::new("idle");
        for _ in 0..3 {
            assert_eq!(idle.tick(), Status::Running);
        }
    }

    #[test]
    fn zero_duration_timer_succeeds_immediately() {
        let mut timer = Timer::new("pause", Duration::ZERO);
        assert_eq!(timer.tick(), Status::Success);
    }

    #[test]
    fn timer_runs_until_deadline() {
        let mut timer = Timer::new("pause", Duration::from_millis(20));
        assert_eq!(timer.tick(), Status::Running);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(timer.tick(), Status::Success);
    }

    #[test]
    fn timer_restarts_after_interruption() {
        let mut timer = Timer::new("pause", Duration::from_millis(50));
        assert_eq!(timer.tick(), Status::Running);
        timer.stop(Status::Invalid);
        // Fresh activation rearms the deadline.
        assert_eq!(timer.tick(), Status::Running);
    }
}
