//! Data-freshness engines: guarded refresh, incremental paging and merge policy.
//!
//! Engines are synchronous state machines. A trigger either issues a
//! [`IssuedRequest`] that the host must execute and report back through
//! `complete`, or returns `None` when a guard blocks it. All mutation happens
//! in those two calls, so a single event loop can drive them without locks.

use crate::fetch::{FetchError, PageRequest};

pub mod articles;
pub mod scroll;
pub mod summary;
pub mod timer;

pub use articles::{ArticleFeed, ArticleView, FeedPhase, FeedState, PagedFeed};
pub use scroll::{NearBottomSubscription, ScrollMetrics, ScrollSignal};
pub use summary::{SummaryFeed, SummaryPhase, SummaryView};
pub use timer::RefreshTimer;

pub const SHAPE_ERROR_MESSAGE: &str = "Unexpected response format from server.";
pub const SUMMARY_ERROR_MESSAGE: &str = "Failed to fetch summary.";
pub const ARTICLES_ERROR_MESSAGE: &str = "Failed to fetch news.";

/// Monotonic identity of an issued request, scoped to one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    fn issue(&mut self) -> RequestTicket {
        self.last += 1;
        RequestTicket(self.last)
    }
}

/// A page read the engine has committed to. Only this ticket's result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedRequest {
    pub ticket: RequestTicket,
    pub request: PageRequest,
}

/// Collapse a tagged fetch failure into the feed's user-facing message.
pub fn user_message(err: &FetchError, transport_message: &str) -> String {
    match err {
        FetchError::Shape(_) => SHAPE_ERROR_MESSAGE.to_string(),
        FetchError::Transport(_) => transport_message.to_string(),
    }
}
