//! Wire records served by the news API.

pub mod article;
pub mod summary;
pub mod timestamp;

pub use article::ArticleRecord;
pub use summary::SummaryRecord;
