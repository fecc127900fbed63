#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use news_dashboard::fetch::{FetchError, FetchResult, PageRequest, PageSource, PagedFetcher};

/// In-memory page source. Replies are scripted per (endpoint, page); every
/// call is recorded. When gated, each call waits for one permit.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<(String, u32), Vec<FetchResult<Value>>>>,
    calls: Mutex<Vec<(String, PageRequest)>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let source = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (source, gate)
    }

    /// Queue a reply; replies for the same page are served in order and the
    /// last one repeats.
    pub fn reply(&self, endpoint: &str, page: u32, outcome: FetchResult<Value>) {
        self.replies
            .lock()
            .unwrap()
            .entry((endpoint.to_string(), page))
            .or_default()
            .push(outcome);
    }

    pub fn calls(&self) -> Vec<(String, PageRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| called == endpoint)
            .count()
    }

    fn next_reply(&self, endpoint: &str, page: u32) -> FetchResult<Value> {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&(endpoint.to_string(), page)) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) => queue
                .first()
                .cloned()
                .unwrap_or_else(|| Ok(json!({ "content": [] }))),
            None => Ok(json!({ "content": [] })),
        }
    }
}

impl PageSource for ScriptedSource {
    fn fetch_json<'a>(
        &'a self,
        endpoint: &'a str,
        request: PageRequest,
    ) -> BoxFuture<'a, FetchResult<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), request));
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.acquire()
                    .await
                    .map_err(|err| FetchError::transport(err.to_string()))?
                    .forget();
            }
            self.next_reply(endpoint, request.page)
        })
    }
}

pub fn fetcher_for(source: &Arc<ScriptedSource>) -> PagedFetcher {
    PagedFetcher::new(source.clone())
}

pub fn article_json(id: usize) -> Value {
    json!({
        "timestamp": "2024-05-01T12:00:00",
        "url": format!("https://www.coindesk.com/markets/{id}"),
        "title_jp": format!("記事 {id}"),
        "summary_jp": format!("概要 {id}"),
        "impact": (id % 7) as i64 - 3
    })
}

pub fn article_page(ids: std::ops::Range<usize>) -> Value {
    json!({ "content": ids.map(article_json).collect::<Vec<_>>() })
}

pub fn summary_json(label: &str) -> Value {
    json!({
        "timestamp": "2024-05-01T15:30:00Z",
        "summary1_jp": format!("{label} one"),
        "summary2_jp": format!("{label} two"),
        "summary3_jp": format!("{label} three"),
        "impact": 5,
        "bitcoin_price": "67432.50"
    })
}

pub fn summary_page(label: &str) -> Value {
    json!({ "content": [summary_json(label)] })
}
