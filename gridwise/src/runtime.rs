//! Tokio driver for an [`EnhancedTable`].
//!
//! Host events arrive on an unbounded channel; between events the loop
//! sleeps until the engine's next timer deadline. Closing the channel tears
//! the engine down and hands it back.

use std::time::Instant;

use celldom::Event;
use tokio::sync::mpsc;
use tokio::time::sleep_until;

use crate::table::EnhancedTable;

/// Sleep until a deadline, or wait forever if None.
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

/// Current time on tokio's clock, so paused-clock tests stay deterministic.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Drive `table` until `events` closes. The table must already be mounted.
pub async fn run(mut table: EnhancedTable, mut events: mpsc::UnboundedReceiver<Event>) -> EnhancedTable {
    loop {
        let next_deadline = table.next_deadline();

        tokio::select! {
            received = events.recv() => {
                let Some(mut event) = received else {
                    log::debug!("[runtime] event channel closed");
                    break;
                };
                match table.handle_event(&mut event, now()) {
                    Ok(result) => log::trace!("[runtime] {event:?} -> {result:?}"),
                    Err(err) => log::error!("[runtime] {err}"),
                }
            }
            _ = sleep_until_optional(next_deadline) => {
                let fired = table.tick(now());
                log::trace!("[runtime] deadline reached, fired={fired}");
            }
        }
    }

    table.teardown();
    table
}
