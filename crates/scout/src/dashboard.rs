//! Terminal dashboard for manual event triggers.
//!
//! Reads commands from stdin and feeds the channels the tree's adapters
//! drain on each tick:
//!
//! - `scan`: press the scan button
//! - `battery <pct>`: set the simulated battery level
//! - `quit`: request shutdown

use behavior_tree::ShutdownHandle;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

pub async fn run(
    scan_tx: mpsc::UnboundedSender<()>,
    battery_tx: watch::Sender<f64>,
    shutdown: ShutdownHandle,
) {
    tracing::info!("dashboard ready: `scan`, `battery <pct>`, `quit`");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("scan") => {
                if scan_tx.send(()).is_err() {
                    break;
                }
            }
            Some("battery") => match words.next().and_then(|pct| pct.parse::<f64>().ok()) {
                Some(pct) => {
                    battery_tx.send_replace(pct);
                }
                None => tracing::warn!("usage: battery <pct>"),
            },
            Some("quit") => {
                shutdown.request();
                break;
            }
            Some(other) => tracing::warn!(command = other, "unknown dashboard command"),
            None => {}
        }
    }
}
