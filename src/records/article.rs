use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One translated article. Identity is its position in the feed, not a key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleRecord {
    #[serde(deserialize_with = "crate::records::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub url: String,
    #[serde(rename = "title_jp", alias = "title")]
    pub title: String,
    #[serde(rename = "summary_jp", alias = "summary")]
    pub summary: String,
    pub impact: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_field_names() {
        let record: ArticleRecord = serde_json::from_value(json!({
            "timestamp": "2024-05-01T12:00:00",
            "url": "https://www.coindesk.com/markets/1",
            "title_jp": "ビットコイン急騰",
            "summary_jp": "概要",
            "impact": -3
        }))
        .expect("decodes");

        assert_eq!(record.title, "ビットコイン急騰");
        assert_eq!(record.impact, -3);
    }

    #[test]
    fn accepts_plain_aliases() {
        let record: ArticleRecord = serde_json::from_value(json!({
            "timestamp": "2024-05-01T12:00:00Z",
            "url": "https://example.com",
            "title": "Title",
            "summary": "Body",
            "impact": 4
        }))
        .expect("decodes");

        assert_eq!(record.summary, "Body");
    }
}
