pub mod bootstrap;
pub mod dashboard;

pub use dashboard::{Dashboard, DashboardEvent};
