//! Timer tasks that feed the action bus.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use tubedesc_core::description::ResultId;

use crate::action::Action;

/// Recurring reveal timer. At most one runs at a time; starting a new one
/// or dropping the handle cancels the previous task.
#[derive(Debug, Default)]
pub struct RevealTimer {
    handle: Option<JoinHandle<()>>,
}

impl RevealTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, id: ResultId, period: Duration, tx: mpsc::UnboundedSender<Action>) {
        self.stop();
        debug!(result = %id, ?period, "Reveal timer started");
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(Action::RevealTick(id)).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Send `action` once after `delay`.
pub fn send_after(
    delay: Duration,
    tx: mpsc::UnboundedSender<Action>,
    action: Action,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(action);
    })
}
