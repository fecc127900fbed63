use log::{debug, info, warn};

use crate::config::SummaryFeedConfig;
use crate::fetch::{FetchResult, PageRequest, PageResult};
use crate::records::SummaryRecord;

use super::{user_message, IssuedRequest, RequestTicket, TicketCounter, SUMMARY_ERROR_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Read-only projection handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryView<'a> {
    pub record: Option<&'a SummaryRecord>,
    pub is_loading: bool,
    pub error_message: Option<&'a str>,
}

/// Holds the newest market summary and refreshes it on every timer tick.
#[derive(Debug)]
pub struct SummaryFeed {
    page_size: u32,
    record: Option<SummaryRecord>,
    phase: SummaryPhase,
    last_error: Option<String>,
    in_flight: Option<RequestTicket>,
    tickets: TicketCounter,
    torn_down: bool,
}

impl SummaryFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            record: None,
            phase: SummaryPhase::Idle,
            last_error: None,
            in_flight: None,
            tickets: TicketCounter::default(),
            torn_down: false,
        }
    }

    pub fn from_config(config: &SummaryFeedConfig) -> Self {
        Self::new(config.page_size)
    }

    /// Timer hook. Issues page 0 unless a request is already in flight.
    pub fn on_tick(&mut self) -> Option<IssuedRequest> {
        if self.torn_down || self.in_flight.is_some() {
            return None;
        }

        let ticket = self.tickets.issue();
        self.in_flight = Some(ticket);
        self.phase = SummaryPhase::Loading;
        debug!("summary refresh issued (ticket {})", ticket.value());

        Some(IssuedRequest {
            ticket,
            request: PageRequest::first(self.page_size),
        })
    }

    /// Apply a completed fetch. Returns `false` when the result was discarded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: FetchResult<PageResult<SummaryRecord>>,
    ) -> bool {
        if self.torn_down || self.in_flight != Some(ticket) {
            debug!("summary result for ticket {} discarded", ticket.value());
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                // An empty page keeps the previous record on screen.
                if let Some(latest) = page.items.into_iter().next() {
                    self.record = Some(latest);
                }
                self.phase = SummaryPhase::Ready;
                self.last_error = None;
            }
            Err(err) => {
                warn!("summary refresh failed: {err}");
                self.phase = SummaryPhase::Failed;
                self.last_error = Some(user_message(&err, SUMMARY_ERROR_MESSAGE));
            }
        }
        true
    }

    /// Stop accepting triggers and results.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            info!("summary feed torn down");
        }
        self.torn_down = true;
        self.in_flight = None;
    }

    pub fn phase(&self) -> SummaryPhase {
        self.phase
    }

    pub fn record(&self) -> Option<&SummaryRecord> {
        self.record.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn view(&self) -> SummaryView<'_> {
        SummaryView {
            record: self.record.as_ref(),
            is_loading: self.phase == SummaryPhase::Loading,
            error_message: self.last_error.as_deref(),
        }
    }
}
