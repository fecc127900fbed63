pub mod components;
pub mod screens;
pub mod styles;

pub use components::TerminalGuard;
pub use screens::run_dashboard;
