// id003-rs/id003/src/driver.rs

//! Tokio driver: ticks a `Session` on an interval until told to stop.

#![cfg(feature = "async")]

use std::time::Duration;

use log::info;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};

use crate::Result;
use crate::session::Session;
use crate::transport::Transport;

/// Default period between two `Session::tick` calls.
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Connect `session`, then tick it every `period` until `shutdown` turns
/// true or its sender is dropped. The session is closed on the way out.
pub async fn run<T: Transport>(
    session: &mut Session<T>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    session.connect(tokio::time::Instant::now().into_std())?;

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            at = ticker.tick() => session.tick(at.into_std()),
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("driver: shutting down");
    session.close(tokio::time::Instant::now().into_std())
}
