//! Scout binary: a simulated scan robot driven by a reactive behavior tree.
//!
//! Composition root wiring four pieces together:
//! 1. The behavior tree (built in [`tree`]) ticking on a dedicated
//!    blocking thread at a fixed period
//! 2. Simulated hardware: the rotation controller and LED strip
//! 3. The stdin dashboard feeding button presses and battery readings
//! 4. Shutdown: Ctrl-C (or `quit`) stops the tick loop, which interrupts
//!    the tree and cancels any outstanding rotation before exit

mod adapters;
mod config;
mod dashboard;
mod led;
mod rotate;
mod tree;

use std::time::Duration;

use anyhow::Result;
use behavior_tree::{BehaviorTree, Blackboard};
use tokio::sync::{mpsc, watch};

use crate::config::ScoutConfig;
use crate::led::LedCommand;
use crate::rotate::RotateServer;
use crate::tree::Topics;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ScoutConfig::from_env();
    tracing::info!(?config, "starting scout");

    let blackboard = Blackboard::new();
    let (scan_tx, scan_events) = mpsc::unbounded_channel();
    let (battery_tx, battery) = watch::channel(100.0);
    let (led_tx, led_rx) = watch::channel(LedCommand::Off);
    let rotate = RotateServer::new(Duration::from_millis(config.rotate_duration_ms));

    let root = tree::create_root(
        &blackboard,
        Topics {
            scan_events,
            battery,
            led: led_tx,
        },
        rotate,
        &config,
    );
    let mut tree = BehaviorTree::new(root);
    if let Err(error) = tree.setup(Duration::from_secs(config.setup_timeout_secs)) {
        tracing::error!(%error, "failed to set up the tree, aborting");
        std::process::exit(1);
    }
    let shutdown = tree.shutdown_handle();

    tokio::spawn(dashboard::run(scan_tx, battery_tx, shutdown.clone()));
    tokio::spawn(led_strip(led_rx));

    let period = Duration::from_millis(config.tick_period_ms);
    let ticker = tokio::task::spawn_blocking(move || tree.tick_tock(period));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("interrupt received");
            shutdown.request();
        }
        // `quit` on the dashboard stops the loop without a signal.
        _ = async {
            while !shutdown.is_requested() {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        } => {}
    }

    ticker.await?;
    tracing::info!("scout stopped");
    Ok(())
}

/// Logs LED strip state changes, standing in for the hardware.
async fn led_strip(mut commands: watch::Receiver<LedCommand>) {
    while commands.changed().await.is_ok() {
        let command = commands.borrow_and_update().clone();
        match command {
            LedCommand::Off => tracing::info!("led strip off"),
            LedCommand::Flashing(colour) => tracing::info!(%colour, "led strip flashing"),
        }
    }
}
