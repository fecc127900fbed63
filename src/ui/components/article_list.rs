use ratatui::prelude::Stylize;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::feed::{ArticleView, ScrollMetrics};
use crate::ui::styles::{impact_style, secondary_line};
use crate::utils::{format_display_time, source_domain, wrap_to_width};

/// Terminal rows are reported to the scroll signal in px-equivalent units.
pub const PX_PER_ROW: u32 = 20;

/// Scroll position of the article list, in terminal rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArticleListState {
    offset: usize,
    viewport_rows: usize,
    content_rows: usize,
}

impl ArticleListState {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Record the latest layout and keep the offset inside it.
    pub fn set_geometry(&mut self, viewport_rows: usize, content_rows: usize) {
        self.viewport_rows = viewport_rows;
        self.content_rows = content_rows;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta.unsigned_abs())
        };
        self.offset = target.min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn page_rows(&self) -> isize {
        self.viewport_rows.max(1) as isize
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            viewport_height: to_units(self.viewport_rows),
            scroll_top: to_units(self.offset),
            content_height: to_units(self.content_rows),
        }
    }
}

fn to_units(rows: usize) -> u32 {
    u32::try_from(rows)
        .unwrap_or(u32::MAX)
        .saturating_mul(PX_PER_ROW)
}

/// Pre-wrapped lines for the article list, footer included.
pub fn article_lines(view: &ArticleView<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    if view.items.is_empty() {
        if view.is_initial_loading {
            lines.push(secondary_line("Loading news..."));
        } else if view.error_message.is_none() {
            lines.push(secondary_line("No news yet."));
        }
        return lines;
    }

    for article in view.items {
        for chunk in wrap_to_width(&article.title, width) {
            lines.push(Line::from(Span::styled(
                chunk,
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("Impact: {}", article.impact),
            impact_style(article.impact),
        )));
        for chunk in wrap_to_width(&format!("{}...", article.summary), width) {
            lines.push(Line::from(chunk));
        }
        let meta = format!(
            "Published: {} | Source: {}",
            format_display_time(article.timestamp),
            source_domain(&article.url)
        );
        for chunk in wrap_to_width(&meta, width) {
            lines.push(Line::from(chunk.dim()));
        }
        lines.push(Line::default());
    }

    if view.is_incremental_loading {
        lines.push(secondary_line("Loading more news..."));
    } else if !view.has_more {
        lines.push(secondary_line("No more news to load"));
    }
    lines
}
