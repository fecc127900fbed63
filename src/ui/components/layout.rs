use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the dashboard, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub summary: Rect,
    pub articles: Rect,
    pub help: Rect,
}

const HEADER_ROWS: u16 = 2;
const HELP_ROWS: u16 = 1;
const MIN_LIST_ROWS: u16 = 3;

/// The summary panel takes what it asks for; the list keeps the rest.
pub fn dashboard_areas(area: Rect, summary_rows: u16) -> DashboardAreas {
    let chunks = split_vertical(
        area,
        &[
            Constraint::Length(HEADER_ROWS),
            Constraint::Length(summary_rows),
            Constraint::Min(MIN_LIST_ROWS),
            Constraint::Length(HELP_ROWS),
        ],
    );
    DashboardAreas {
        header: chunks[0],
        summary: chunks[1],
        articles: chunks[2],
        help: chunks[3],
    }
}

/// Peel `rows` off the top of `area` for a status line.
pub fn split_status_row(area: Rect, rows: u16) -> (Rect, Rect) {
    let chunks = split_vertical(area, &[Constraint::Length(rows), Constraint::Min(0)]);
    (chunks[0], chunks[1])
}

fn split_vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}
