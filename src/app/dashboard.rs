use log::{debug, info};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::feed::{
    ArticleFeed, ArticleView, IssuedRequest, NearBottomSubscription, RefreshTimer,
    RequestTicket, ScrollSignal, SummaryFeed, SummaryView,
};
use crate::fetch::{FetchResult, PageResult, PagedFetcher};
use crate::records::{ArticleRecord, SummaryRecord};

/// Everything that can change dashboard state, delivered through one channel.
#[derive(Debug)]
pub enum DashboardEvent {
    SummaryTick,
    ArticleTick,
    SummaryLoaded(RequestTicket, FetchResult<PageResult<SummaryRecord>>),
    ArticlesLoaded(RequestTicket, FetchResult<PageResult<ArticleRecord>>),
}

/// Owns both feed engines and the tasks that feed them.
///
/// Fetches run as tokio tasks, but their results come back as events and are
/// applied only from `handle_event`, in completion order.
pub struct Dashboard {
    fetcher: PagedFetcher,
    config: Config,
    summary: SummaryFeed,
    articles: ArticleFeed,
    events_tx: UnboundedSender<DashboardEvent>,
    events_rx: UnboundedReceiver<DashboardEvent>,
    summary_timer: Option<RefreshTimer>,
    article_timer: Option<RefreshTimer>,
    near_bottom: Option<NearBottomSubscription>,
    requests_issued: usize,
}

impl Dashboard {
    pub fn new(config: &Config, fetcher: PagedFetcher) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            config: config.clone(),
            summary: SummaryFeed::from_config(&config.summary),
            articles: ArticleFeed::from_config(&config.articles),
            events_tx,
            events_rx,
            summary_timer: None,
            article_timer: None,
            near_bottom: None,
            requests_issued: 0,
        }
    }

    /// Start both timers and subscribe to near-bottom scroll events.
    pub fn start(&mut self, scroll: &ScrollSignal) {
        if self.summary.is_torn_down() || self.articles.is_torn_down() {
            return;
        }

        if self.summary_timer.is_none() {
            self.summary_timer = Some(RefreshTimer::start(
                "summary",
                self.config.summary.refresh_period(),
                self.events_tx.clone(),
                || DashboardEvent::SummaryTick,
            ));
        }
        if self.article_timer.is_none() {
            self.article_timer = Some(RefreshTimer::start(
                "articles",
                self.config.articles.refresh_period(),
                self.events_tx.clone(),
                || DashboardEvent::ArticleTick,
            ));
        }
        if self.near_bottom.is_none() {
            self.near_bottom =
                Some(scroll.subscribe_near_bottom(self.config.articles.near_bottom_threshold));
        }
        info!("dashboard started against {}", self.config.api.base_url);
    }

    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SummaryTick => self.refresh_summary(),
            DashboardEvent::ArticleTick => self.refresh_articles(),
            DashboardEvent::SummaryLoaded(ticket, outcome) => {
                self.summary.complete(ticket, outcome);
            }
            DashboardEvent::ArticlesLoaded(ticket, outcome) => {
                self.articles.complete(ticket, outcome);
            }
        }
    }

    /// Summary timer hook.
    pub fn refresh_summary(&mut self) {
        if let Some(issued) = self.summary.on_tick() {
            self.dispatch_summary(issued);
        }
    }

    /// Article timer hook.
    pub fn refresh_articles(&mut self) {
        if let Some(issued) = self.articles.on_refresh_tick() {
            self.dispatch_articles(issued);
        }
    }

    /// Near-bottom hook. Returns whether a request was issued.
    pub fn load_more_articles(&mut self) -> bool {
        match self.articles.on_near_bottom() {
            Some(issued) => {
                self.dispatch_articles(issued);
                true
            }
            None => false,
        }
    }

    /// Apply every event and scroll notification that is already pending.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;

        while let Some(subscription) = self.near_bottom.as_mut() {
            if subscription.try_next().is_none() {
                break;
            }
            self.load_more_articles();
            handled += 1;
        }

        loop {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Wait for the next event and apply it.
    pub async fn process_next(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Cancel timers and the scroll subscription; late results are dropped.
    pub fn teardown(&mut self) {
        if let Some(mut timer) = self.summary_timer.take() {
            timer.cancel();
        }
        if let Some(mut timer) = self.article_timer.take() {
            timer.cancel();
        }
        if let Some(subscription) = self.near_bottom.take() {
            subscription.cancel();
        }
        self.summary.teardown();
        self.articles.teardown();
        info!("dashboard torn down");
    }

    pub fn summary(&self) -> SummaryView<'_> {
        self.summary.view()
    }

    pub fn articles(&self) -> ArticleView<'_> {
        self.articles.view()
    }

    pub fn summary_feed(&self) -> &SummaryFeed {
        &self.summary
    }

    pub fn article_feed(&self) -> &ArticleFeed {
        &self.articles
    }

    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    pub fn is_running(&self) -> bool {
        self.summary_timer.is_some() || self.article_timer.is_some()
    }

    fn dispatch_summary(&mut self, issued: IssuedRequest) {
        self.requests_issued += 1;
        let fetcher = self.fetcher.clone();
        let endpoint = self.config.summary.endpoint.clone();
        let events = self.events_tx.clone();
        debug!("dispatching summary page {}", issued.request.page);

        tokio::spawn(async move {
            let outcome = fetcher
                .fetch_page::<SummaryRecord>(&endpoint, issued.request)
                .await;
            let _ = events.send(DashboardEvent::SummaryLoaded(issued.ticket, outcome));
        });
    }

    fn dispatch_articles(&mut self, issued: IssuedRequest) {
        self.requests_issued += 1;
        let fetcher = self.fetcher.clone();
        let endpoint = self.config.articles.endpoint.clone();
        let events = self.events_tx.clone();
        debug!("dispatching article page {}", issued.request.page);

        tokio::spawn(async move {
            let outcome = fetcher
                .fetch_page::<ArticleRecord>(&endpoint, issued.request)
                .await;
            let _ = events.send(DashboardEvent::ArticlesLoaded(issued.ticket, outcome));
        });
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if self.is_running() {
            self.teardown();
        }
    }
}
