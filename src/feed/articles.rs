use log::{debug, info, warn};

use crate::config::ArticleFeedConfig;
use crate::fetch::{FetchResult, PageRequest, PageResult};
use crate::records::ArticleRecord;

use super::{
    user_message, IssuedRequest, RequestTicket, TicketCounter, ARTICLES_ERROR_MESSAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    InitialLoading,
    IncrementalLoading,
    Ready,
    Failed,
}

/// Accumulated pages of one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub has_more: bool,
    pub phase: FeedPhase,
    pub last_error: Option<String>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_more: true,
            phase: FeedPhase::Idle,
            last_error: None,
        }
    }
}

/// Read-only projection handed to the renderer.
#[derive(Debug, Clone)]
pub struct ArticleView<'a, T = ArticleRecord> {
    pub items: &'a [T],
    pub is_initial_loading: bool,
    pub is_incremental_loading: bool,
    pub error_message: Option<&'a str>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Refresh,
    Incremental,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: RequestTicket,
    kind: LoadKind,
}

/// Timer-refreshed, scroll-extended list feed.
#[derive(Debug)]
pub struct PagedFeed<T> {
    page_size: u32,
    transport_message: &'static str,
    state: FeedState<T>,
    in_flight: Option<InFlight>,
    tickets: TicketCounter,
    // Set once page 0 has loaded; incremental paging waits for it.
    first_page_loaded: bool,
    torn_down: bool,
}

pub type ArticleFeed = PagedFeed<ArticleRecord>;

impl ArticleFeed {
    pub fn from_config(config: &ArticleFeedConfig) -> Self {
        Self::new(config.page_size, ARTICLES_ERROR_MESSAGE)
    }
}

impl<T> PagedFeed<T> {
    pub fn new(page_size: u32, transport_message: &'static str) -> Self {
        Self {
            page_size,
            transport_message,
            state: FeedState::default(),
            in_flight: None,
            tickets: TicketCounter::default(),
            first_page_loaded: false,
            torn_down: false,
        }
    }

    /// Timer hook: reload page 0. Also performs the initial load from `Idle`.
    pub fn on_refresh_tick(&mut self) -> Option<IssuedRequest> {
        if self.torn_down || self.in_flight.is_some() {
            return None;
        }

        self.state.phase = FeedPhase::InitialLoading;
        Some(self.issue(LoadKind::Refresh, PageRequest::first(self.page_size)))
    }

    /// Near-bottom hook: fetch the page after `current_page` when allowed.
    pub fn on_near_bottom(&mut self) -> Option<IssuedRequest> {
        if self.torn_down || self.in_flight.is_some() || !self.state.has_more {
            return None;
        }
        if !self.first_page_loaded {
            return None;
        }
        if !matches!(self.state.phase, FeedPhase::Ready | FeedPhase::Failed) {
            return None;
        }

        self.state.phase = FeedPhase::IncrementalLoading;
        let request = PageRequest::new(self.state.current_page, self.page_size).next();
        Some(self.issue(LoadKind::Incremental, request))
    }

    fn issue(&mut self, kind: LoadKind, request: PageRequest) -> IssuedRequest {
        let ticket = self.tickets.issue();
        self.in_flight = Some(InFlight { ticket, kind });
        debug!(
            "{kind:?} load issued for page {} (ticket {})",
            request.page,
            ticket.value()
        );
        IssuedRequest { ticket, request }
    }

    /// Merge a completed fetch. Returns `false` when the result was discarded.
    pub fn complete(&mut self, ticket: RequestTicket, outcome: FetchResult<PageResult<T>>) -> bool {
        let in_flight = match self.in_flight {
            Some(in_flight) if !self.torn_down && in_flight.ticket == ticket => in_flight,
            _ => {
                debug!("feed result for ticket {} discarded", ticket.value());
                return false;
            }
        };
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                let has_more = !page.is_last_page();
                match in_flight.kind {
                    LoadKind::Refresh => {
                        self.state.items = page.items;
                        self.state.current_page = 0;
                        self.first_page_loaded = true;
                    }
                    LoadKind::Incremental => {
                        self.state.items.extend(page.items);
                        self.state.current_page = page.requested_page;
                    }
                }
                self.state.has_more = has_more;
                self.state.phase = FeedPhase::Ready;
                self.state.last_error = None;
                debug!(
                    "feed now holds {} items (page {}, has_more={})",
                    self.state.items.len(),
                    self.state.current_page,
                    self.state.has_more
                );
            }
            Err(err) => {
                warn!("{:?} load failed: {err}", in_flight.kind);
                self.state.phase = FeedPhase::Failed;
                self.state.last_error = Some(user_message(&err, self.transport_message));
            }
        }
        true
    }

    /// Stop accepting triggers and results.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            info!("paged feed torn down");
        }
        self.torn_down = true;
        self.in_flight = None;
    }

    pub fn state(&self) -> &FeedState<T> {
        &self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn view(&self) -> ArticleView<'_, T> {
        ArticleView {
            items: &self.state.items,
            is_initial_loading: self.state.phase == FeedPhase::InitialLoading,
            is_incremental_loading: self.state.phase == FeedPhase::IncrementalLoading,
            error_message: self.state.last_error.as_deref(),
            has_more: self.state.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::SHAPE_ERROR_MESSAGE;
    use crate::fetch::FetchError;

    fn feed() -> PagedFeed<u32> {
        PagedFeed::new(10, ARTICLES_ERROR_MESSAGE)
    }

    fn page(request: PageRequest, range: std::ops::Range<u32>) -> FetchResult<PageResult<u32>> {
        Ok(PageResult {
            items: range.collect(),
            requested_page: request.page,
            page_size: request.size,
        })
    }

    fn loaded(count: u32) -> PagedFeed<u32> {
        let mut feed = feed();
        let issued = feed.on_refresh_tick().expect("initial load");
        assert!(feed.complete(issued.ticket, page(issued.request, 0..count)));
        feed
    }

    #[test]
    fn initial_load_moves_idle_to_ready() {
        let mut feed = feed();
        assert_eq!(feed.state().phase, FeedPhase::Idle);
        assert!(feed.on_near_bottom().is_none(), "no paging before first load");

        let issued = feed.on_refresh_tick().expect("issued");
        assert_eq!(issued.request, PageRequest::new(0, 10));
        assert!(feed.view().is_initial_loading);

        feed.complete(issued.ticket, page(issued.request, 0..10));
        let state = feed.state();
        assert_eq!(state.phase, FeedPhase::Ready);
        assert_eq!(state.items.len(), 10);
        assert!(state.has_more);
        assert_eq!(state.current_page, 0);
    }

    #[test]
    fn refresh_replaces_instead_of_appending() {
        let mut feed = loaded(10);

        let issued = feed.on_refresh_tick().expect("refresh");
        feed.complete(issued.ticket, page(issued.request, 0..10));

        assert_eq!(feed.state().items.len(), 10);
        assert_eq!(feed.state().current_page, 0);
    }

    #[test]
    fn refresh_resets_paging_after_incremental_loads() {
        let mut feed = loaded(10);
        let more = feed.on_near_bottom().expect("page 1");
        feed.complete(more.ticket, page(more.request, 10..13));
        assert!(!feed.state().has_more);

        let refresh = feed.on_refresh_tick().expect("refresh");
        feed.complete(refresh.ticket, page(refresh.request, 100..110));

        let state = feed.state();
        assert_eq!(state.items, (100..110).collect::<Vec<_>>());
        assert_eq!(state.current_page, 0);
        assert!(state.has_more);
    }

    #[test]
    fn incremental_load_appends_and_advances() {
        let mut feed = loaded(10);

        let issued = feed.on_near_bottom().expect("issued");
        assert_eq!(issued.request, PageRequest::new(1, 10));
        assert!(feed.view().is_incremental_loading);

        feed.complete(issued.ticket, page(issued.request, 10..20));
        let state = feed.state();
        assert_eq!(state.items.len(), 20);
        assert_eq!(state.current_page, 1);
        assert!(state.has_more);
        assert_eq!(state.items[10], 10);
    }

    #[test]
    fn short_page_stops_paging() {
        let mut feed = loaded(7);
        assert!(!feed.state().has_more);
        assert!(feed.on_near_bottom().is_none());
    }

    #[test]
    fn in_flight_guard_blocks_every_other_trigger() {
        let mut feed = loaded(10);

        let scroll = feed.on_near_bottom().expect("scroll load");
        assert!(feed.on_refresh_tick().is_none());
        assert!(feed.on_near_bottom().is_none());

        feed.complete(scroll.ticket, page(scroll.request, 10..20));
        let refresh = feed.on_refresh_tick().expect("refresh after completion");
        assert!(feed.on_near_bottom().is_none());
        assert!(feed.on_refresh_tick().is_none());
        assert!(feed.complete(refresh.ticket, page(refresh.request, 0..10)));
    }

    #[test]
    fn failures_keep_items_and_allow_scroll_retry() {
        let mut feed = loaded(10);

        let issued = feed.on_near_bottom().expect("issued");
        feed.complete(issued.ticket, Err(FetchError::transport("timeout")));

        let state = feed.state();
        assert_eq!(state.phase, FeedPhase::Failed);
        assert_eq!(state.items.len(), 10);
        assert_eq!(state.current_page, 0);
        assert_eq!(state.last_error.as_deref(), Some(ARTICLES_ERROR_MESSAGE));

        let retry = feed.on_near_bottom().expect("retry on next scroll");
        assert_eq!(retry.request.page, 1);
        feed.complete(retry.ticket, page(retry.request, 10..14));
        assert_eq!(feed.state().items.len(), 14);
        assert_eq!(feed.view().error_message, None);
    }

    #[test]
    fn failed_initial_load_waits_for_refresh_before_paging() {
        let mut feed = feed();
        let issued = feed.on_refresh_tick().expect("initial load");
        feed.complete(issued.ticket, Err(FetchError::transport("connection refused")));

        assert_eq!(feed.state().phase, FeedPhase::Failed);
        assert!(feed.state().items.is_empty());
        assert!(
            feed.on_near_bottom().is_none(),
            "page 1 must not load before page 0"
        );

        let retry = feed.on_refresh_tick().expect("next tick retries page 0");
        assert_eq!(retry.request.page, 0);
        assert!(feed.complete(retry.ticket, page(retry.request, 0..10)));

        let more = feed.on_near_bottom().expect("paging after page 0");
        assert_eq!(more.request.page, 1);
    }

    #[test]
    fn refresh_failure_reports_shape_message() {
        let mut feed = loaded(10);
        let issued = feed.on_refresh_tick().expect("issued");
        feed.complete(issued.ticket, Err(FetchError::shape("content is an object")));

        assert_eq!(feed.state().items.len(), 10);
        assert_eq!(feed.view().error_message, Some(SHAPE_ERROR_MESSAGE));
    }

    #[test]
    fn stale_and_unknown_tickets_are_discarded() {
        let mut feed = loaded(10);
        let issued = feed.on_near_bottom().expect("issued");
        let bogus = RequestTicket(issued.ticket.value() + 5);

        assert!(!feed.complete(bogus, page(issued.request, 50..60)));
        assert!(feed.is_in_flight());
        assert!(feed.complete(issued.ticket, page(issued.request, 10..20)));
        assert!(!feed.complete(issued.ticket, page(issued.request, 10..20)));
        assert_eq!(feed.state().items.len(), 20);
    }

    #[test]
    fn teardown_drops_late_results() {
        let mut feed = loaded(10);
        let issued = feed.on_near_bottom().expect("issued");
        feed.teardown();

        assert!(!feed.complete(issued.ticket, page(issued.request, 10..20)));
        assert_eq!(feed.state().items.len(), 10);
        assert!(feed.on_refresh_tick().is_none());
    }
}
