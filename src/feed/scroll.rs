use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Viewport geometry at the moment of a scroll, in px-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: u32,
    pub scroll_top: u32,
    pub content_height: u32,
}

impl ScrollMetrics {
    pub fn is_near_bottom(&self, threshold: u32) -> bool {
        u64::from(self.viewport_height) + u64::from(self.scroll_top) + u64::from(threshold)
            >= u64::from(self.content_height)
    }
}

struct Subscriber {
    id: u64,
    threshold: u32,
    tx: UnboundedSender<ScrollMetrics>,
}

type Subscribers = Arc<Mutex<Vec<Subscriber>>>;

/// Host-side scroll event source. The host publishes every scroll; each
/// subscription only receives events that land within its threshold.
#[derive(Default)]
pub struct ScrollSignal {
    subscribers: Subscribers,
    next_id: AtomicU64,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_near_bottom(&self, threshold: u32) -> NearBottomSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber { id, threshold, tx });
        }

        NearBottomSubscription {
            id,
            rx,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Deliver one scroll event. Returns how many subscriptions were notified.
    pub fn publish(&self, metrics: ScrollMetrics) -> usize {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return 0;
        };
        subscribers.retain(|subscriber| !subscriber.tx.is_closed());

        subscribers
            .iter()
            .filter(|subscriber| metrics.is_near_bottom(subscriber.threshold))
            .filter(|subscriber| subscriber.tx.send(metrics).is_ok())
            .count()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }
}

/// Cancellable near-bottom subscription. Dropping it unsubscribes.
pub struct NearBottomSubscription {
    id: u64,
    rx: UnboundedReceiver<ScrollMetrics>,
    subscribers: Weak<Mutex<Vec<Subscriber>>>,
}

impl NearBottomSubscription {
    /// Next pending near-bottom event, without waiting.
    pub fn try_next(&mut self) -> Option<ScrollMetrics> {
        match self.rx.try_recv() {
            Ok(metrics) => Some(metrics),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn cancel(self) {}
}

impl Drop for NearBottomSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            if let Ok(mut subscribers) = subscribers.lock() {
                subscribers.retain(|subscriber| subscriber.id != self.id);
            }
        }
    }
}
