pub mod article_list;
pub mod layout;
pub mod summary_panel;
pub mod terminal;

pub use article_list::{article_lines, ArticleListState, PX_PER_ROW};
pub use layout::{dashboard_areas, split_status_row, DashboardAreas};
pub use summary_panel::summary_lines;
pub use terminal::TerminalGuard;
