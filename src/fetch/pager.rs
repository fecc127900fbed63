use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::{decode_items, FetchError, FetchResult, PageRequest, PageResult, PageSource};

/// One normalised paginated read on top of a [`PageSource`]. Holds no feed state.
#[derive(Clone)]
pub struct PagedFetcher {
    source: Arc<dyn PageSource>,
}

impl PagedFetcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: PageRequest,
    ) -> FetchResult<PageResult<T>> {
        if request.size == 0 {
            return Err(FetchError::transport(format!(
                "page size for {endpoint} must be greater than zero"
            )));
        }

        debug!(
            "GET {endpoint} page={} size={}",
            request.page, request.size
        );
        let payload = self.source.fetch_json(endpoint, request).await?;
        let mut items = decode_items::<T>(&payload)?;

        let limit = request.size as usize;
        if items.len() > limit {
            warn!(
                "{endpoint} returned {} items for page size {limit}; truncating",
                items.len()
            );
            items.truncate(limit);
        }

        Ok(PageResult {
            items,
            requested_page: request.page,
            page_size: request.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::BoxFuture;
    use serde_json::{json, Value};

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl PageSource for CountingSource {
        fn fetch_json<'a>(
            &'a self,
            _endpoint: &'a str,
            _request: PageRequest,
        ) -> BoxFuture<'a, FetchResult<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(json!({ "content": [1, 2, 3, 4] })) })
        }
    }

    #[tokio::test]
    async fn zero_size_is_rejected_before_any_call() {
        let source = Arc::new(CountingSource::default());
        let fetcher = PagedFetcher::new(source.clone());

        let err = fetcher
            .fetch_page::<u32>("/api/news/translations", PageRequest::first(0))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)), "{err}");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn long_pages_are_cut_to_the_requested_size() {
        let source = Arc::new(CountingSource::default());
        let fetcher = PagedFetcher::new(source.clone());

        let page = fetcher
            .fetch_page::<u32>("/api/news/translations", PageRequest::new(3, 2))
            .await
            .expect("page");

        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.requested_page, 3);
        assert!(!page.is_last_page());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
