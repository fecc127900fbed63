use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Periodic tick task owned by one feed. The first tick fires immediately.
pub struct RefreshTimer {
    label: &'static str,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    /// Spawn the ticker. Must be called inside a tokio runtime.
    pub fn start<E, F>(
        label: &'static str,
        period: Duration,
        events: UnboundedSender<E>,
        make_event: F,
    ) -> Self
    where
        E: Send + 'static,
        F: Fn() -> E + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(make_event()).is_err() {
                    break;
                }
            }
        });
        debug!("{label} timer started with period {period:?}");

        Self {
            label,
            period,
            handle: Some(handle),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("{} timer cancelled", self.label);
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
