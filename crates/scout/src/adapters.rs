//! Topic-to-blackboard adapter behaviors.
//!
//! These leaves bridge the asynchronous world into the tick loop: channel
//! senders live on tokio tasks (dashboard, battery feed), and on each tick
//! the adapters reduce whatever arrived since the last tick to blackboard
//! variables. They sit in a sequence ticked ahead of the priority branch,
//! so every condition in the tree reads this tick's snapshot.

use behavior_tree::{Behavior, Blackboard, Key, Status};
use tokio::sync::{mpsc, watch};

/// Latches "at least one event arrived since the last tick" into a boolean
/// blackboard variable.
///
/// The flag auto-resets: a press is visible for exactly one tick, which is
/// what makes the scan trigger one-shot.
pub struct EventToBlackboard {
    name: String,
    status: Status,
    blackboard: Blackboard,
    key: Key<bool>,
    events: mpsc::UnboundedReceiver<()>,
}

impl EventToBlackboard {
    pub fn new(
        name: impl Into<String>,
        blackboard: Blackboard,
        key: Key<bool>,
        events: mpsc::UnboundedReceiver<()>,
    ) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            blackboard,
            key,
            events,
        }
    }
}

impl Behavior for EventToBlackboard {
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
        let mut observed = false;
        while self.events.try_recv().is_ok() {
            observed = true;
        }
        if observed {
            tracing::debug!(node = %self.name, key = self.key.name(), "event observed");
        }
        self.blackboard.set(&self.key, observed);
        Status::Success
    }
}

/// Mirrors the latest battery reading onto the blackboard, along with a
/// low-battery warning flag derived from a threshold compare.
pub struct BatteryToBlackboard {
    name: String,
    status: Status,
    blackboard: Blackboard,
    percentage: Key<f64>,
    warning: Key<bool>,
    threshold: f64,
    readings: watch::Receiver<f64>,
}

impl BatteryToBlackboard {
    pub fn new(
        name: impl Into<String>,
        blackboard: Blackboard,
        percentage: Key<f64>,
        warning: Key<bool>,
        threshold: f64,
        readings: watch::Receiver<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            blackboard,
            percentage,
            warning,
            threshold,
            readings,
        }
    }
}

impl Behavior for BatteryToBlackboard {
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
        let reading = *self.readings.borrow();
        let low = reading < self.threshold;
        if low && !self.blackboard.get(&self.warning).unwrap_or(false) {
            tracing::warn!(node = %self.name, reading, "battery low");
        }
        self.blackboard.set(&self.percentage, reading);
        self.blackboard.set(&self.warning, low);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_flag_is_one_shot() {
        let blackboard = Blackboard::new();
        let key = Key::<bool>::new("event_scan_button");
        let (tx, rx) = mpsc::unbounded_channel();
        let mut adapter = EventToBlackboard::new("scan2bb", blackboard.clone(), key.clone(), rx);

        tx.send(()).unwrap();
        tx.send(()).unwrap();
        assert_eq!(adapter.tick(), Status::Success);
        assert_eq!(blackboard.get(&key), Some(true));

        // No new events: the flag resets on the next tick.
        assert_eq!(adapter.tick(), Status::Success);
        assert_eq!(blackboard.get(&key), Some(false));
    }

    #[test]
    fn battery_warning_follows_threshold() {
        let blackboard = Blackboard::new();
        let percentage = Key::<f64>::new("battery_percentage");
        let warning = Key::<bool>::new("battery_low_warning");
        let (tx, rx) = watch::channel(100.0);
        let mut adapter = BatteryToBlackboard::new(
            "battery2bb",
            blackboard.clone(),
            percentage.clone(),
            warning.clone(),
            30.0,
            rx,
        );

        adapter.tick();
        assert_eq!(blackboard.get(&warning), Some(false));

        tx.send_replace(12.5);
        adapter.tick();
        assert_eq!(blackboard.get(&percentage), Some(12.5));
        assert_eq!(blackboard.get(&warning), Some(true));
    }
}
