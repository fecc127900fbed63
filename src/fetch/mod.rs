use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;

pub mod client;
pub mod decode;
pub mod pager;

pub use client::HttpPageSource;
pub use decode::{classify_payload, decode_items, PageShape};
pub use pager::PagedFetcher;

pub const SUMMARIES_ENDPOINT: &str = "/api/news/summaries";
pub const TRANSLATIONS_ENDPOINT: &str = "/api/news/translations";

/// Tagged failure of a single page read. Never raised past the feed engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response format: {0}")]
    Shape(String),
}

impl FetchError {
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        FetchError::Transport(msg.into())
    }

    pub fn shape<T: Into<String>>(msg: T) -> Self {
        FetchError::Shape(msg.into())
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, FetchError::Shape(_))
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Zero-based page index plus the maximum number of items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }
}

/// Normalised page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub requested_page: u32,
    pub page_size: u32,
}

impl<T> PageResult<T> {
    /// A short page is the only end-of-stream signal the API gives.
    pub fn is_last_page(&self) -> bool {
        self.items.len() < self.page_size as usize
    }
}

/// Transport seam: returns the raw JSON body of one paged GET.
pub trait PageSource: Send + Sync {
    fn fetch_json<'a>(
        &'a self,
        endpoint: &'a str,
        request: PageRequest,
    ) -> BoxFuture<'a, FetchResult<Value>>;
}
