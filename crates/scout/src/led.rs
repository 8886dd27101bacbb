//! LED strip command publishing.

use behavior_tree::{Behavior, Status};
use tokio::sync::watch;

/// Command currently driving the LED strip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LedCommand {
    #[default]
    Off,
    Flashing(String),
}

/// Publishes a flash command every tick and never finishes on its own.
///
/// Runs inside a parallel alongside the action it accompanies; the sibling
/// finishing (or a preemption) terminates this leaf, which switches the
/// strip off on the way out.
pub struct FlashLedStrip {
    name: String,
    status: Status,
    colour: String,
    tx: watch::Sender<LedCommand>,
}

impl FlashLedStrip {
    pub fn new(name: impl Into<String>, colour: &str, tx: watch::Sender<LedCommand>) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            colour: colour.to_owned(),
            tx,
        }
    }
}

impl Behavior for FlashLedStrip {
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
        self.tx
            .send_replace(LedCommand::Flashing(self.colour.clone()));
        Status::Running
    }

    fn terminate(&mut self, _new_status: Status) {
        tracing::debug!(node = %self.name, "led strip off");
        self.tx.send_replace(LedCommand::Off);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashes_while_ticked_and_clears_on_terminate() {
        let (tx, rx) = watch::channel(LedCommand::Off);
        let mut flash = FlashLedStrip::new("flash blue", "blue", tx);

        assert_eq!(flash.tick(), Status::Running);
        assert_eq!(*rx.borrow(), LedCommand::Flashing("blue".to_owned()));

        flash.stop(Status::Invalid);
        assert_eq!(*rx.borrow(), LedCommand::Off);
    }
}
