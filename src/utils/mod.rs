pub mod text;
pub mod time;

pub use text::{format_usd_price, source_domain, wrap_to_width};
pub use time::{current_human_timestamp, format_display_time};
