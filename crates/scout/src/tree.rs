//! Scout tree assembly.
//!
//! The nesting below mirrors the tree shape:
//!
//! ```text
//! scout (parallel, success on all)
//! ├── topics2bb (sequence)
//! │   ├── scan2bb      → event_scan_button
//! │   └── battery2bb   → battery_percentage, battery_low_warning
//! └── priorities (selector)
//!     ├── battery emergency (success-is-failure)
//!     │   ├── battery ok?
//!     │   └── flash red
//!     ├── scan (sequence)
//!     │   ├── scan requested?
//!     │   ├── preempt? (selector)
//!     │   │   ├── scan again? (success-is-running)
//!     │   │   └── scanning (parallel, success on one)
//!     │   │       ├── rotate
//!     │   │       └── flash blue
//!     │   └── celebrate (parallel, success on one)
//!     │       ├── flash green
//!     │       └── pause
//!     └── idle
//! ```

use std::time::Duration;

use behavior_tree::builder::{
    parallel, selector, sequence, success_is_failure, success_is_running,
};
use behavior_tree::{
    ActionClient, Behavior, Blackboard, CheckBlackboardVariable, Idle, Key, ParallelPolicy,
    Timer,
};
use tokio::sync::{mpsc, watch};

use crate::adapters::{BatteryToBlackboard, EventToBlackboard};
use crate::config::ScoutConfig;
use crate::led::{FlashLedStrip, LedCommand};
use crate::rotate::{RotateGoal, RotateServer};

/// Channel ends the tree consumes and produces.
pub struct Topics {
    pub scan_events: mpsc::UnboundedReceiver<()>,
    pub battery: watch::Receiver<f64>,
    pub led: watch::Sender<LedCommand>,
}

/// Builds the full scout tree.
pub fn create_root(
    blackboard: &Blackboard,
    topics: Topics,
    rotate: RotateServer,
    config: &ScoutConfig,
) -> Box<dyn Behavior> {
    let scan_button = Key::<bool>::new("event_scan_button");
    let battery_percentage = Key::<f64>::new("battery_percentage");
    let battery_low = Key::<bool>::new("battery_low_warning");

    let scan2bb = EventToBlackboard::new(
        "scan2bb",
        blackboard.clone(),
        scan_button.clone(),
        topics.scan_events,
    );
    let battery2bb = BatteryToBlackboard::new(
        "battery2bb",
        blackboard.clone(),
        battery_percentage,
        battery_low.clone(),
        config.battery_threshold,
        topics.battery,
    );

    let battery_ok = CheckBlackboardVariable::new(
        "battery ok?",
        blackboard.clone(),
        battery_low,
        false,
    );
    let scan_requested = CheckBlackboardVariable::new(
        "scan requested?",
        blackboard.clone(),
        scan_button.clone(),
        true,
    );
    let scan_again = CheckBlackboardVariable::new(
        "scan again?",
        blackboard.clone(),
        scan_button,
        true,
    );

    parallel(
        "scout",
        ParallelPolicy::SuccessOnAll,
        vec![
            sequence(
                "topics2bb",
                vec![
                    Box::new(scan2bb) as Box<dyn Behavior>,
                    Box::new(battery2bb),
                ],
            ),
            selector(
                "priorities",
                vec![
                    success_is_failure(
                        "battery emergency",
                        selector(
                            "battery check",
                            vec![
                                Box::new(battery_ok) as Box<dyn Behavior>,
                                Box::new(FlashLedStrip::new(
                                    "flash red",
                                    "red",
                                    topics.led.clone(),
                                )),
                            ],
                        ),
                    ),
                    sequence(
                        "scan",
                        vec![
                            Box::new(scan_requested) as Box<dyn Behavior>,
                            selector(
                                "preempt?",
                                vec![
                                    success_is_running("scan again", Box::new(scan_again)),
                                    parallel(
                                        "scanning",
                                        ParallelPolicy::SuccessOnOne,
                                        vec![
                                            Box::new(ActionClient::new(
                                                "rotate",
                                                rotate,
                                                RotateGoal::default(),
                                            ))
                                                as Box<dyn Behavior>,
                                            Box::new(FlashLedStrip::new(
                                                "flash blue",
                                                "blue",
                                                topics.led.clone(),
                                            )),
                                        ],
                                    ),
                                ],
                            ),
                            parallel(
                                "celebrate",
                                ParallelPolicy::SuccessOnOne,
                                vec![
                                    Box::new(FlashLedStrip::new(
                                        "flash green",
                                        "green",
                                        topics.led,
                                    ))
                                        as Box<dyn Behavior>,
                                    Box::new(Timer::new(
                                        "pause",
                                        Duration::from_secs(config.pause_secs),
                                    )),
                                ],
                            ),
                        ],
                    ),
                    Box::new(Idle::new("idle")),
                ],
            ),
        ],
    )
}
