use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Rolling market summary. Only the newest one is ever retained.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryRecord {
    #[serde(deserialize_with = "crate::records::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "summary1_jp", alias = "summary1")]
    pub summary1: String,
    #[serde(rename = "summary2_jp", alias = "summary2")]
    pub summary2: String,
    #[serde(rename = "summary3_jp", alias = "summary3")]
    pub summary3: String,
    /// Market impact, conceptually within -10..=10.
    pub impact: i64,
    /// Kept as the decimal string the server sends.
    #[serde(rename = "bitcoin_price", alias = "bitcoinPrice")]
    pub bitcoin_price: String,
}

impl SummaryRecord {
    pub fn lines(&self) -> [&str; 3] {
        [&self.summary1, &self.summary2, &self.summary3]
    }
}
