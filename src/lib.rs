pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod records;
pub mod ui;
pub mod utils;

pub use error::{AppError, Result};
