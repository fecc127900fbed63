use ratatui::prelude::Stylize;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::feed::SummaryView;
use crate::ui::styles::{impact_style, secondary_line};
use crate::utils::{format_display_time, format_usd_price, wrap_to_width};

/// Lines for the market summary panel. Errors are rendered by the caller.
pub fn summary_lines(view: &SummaryView<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));

    let Some(record) = view.record else {
        return if view.is_loading {
            vec![secondary_line("Loading summary...")]
        } else if view.error_message.is_some() {
            Vec::new()
        } else {
            vec![secondary_line("No summary available.")]
        };
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Market Impact: {}", record.impact),
            impact_style(record.impact).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::from("Bitcoin Price: ").bold(),
            Span::from(format_usd_price(&record.bitcoin_price)),
        ]),
        Line::from("Key Summaries:".bold()),
    ];

    for entry in record.lines() {
        let mut chunks = wrap_to_width(entry, width.saturating_sub(2)).into_iter();
        if let Some(first) = chunks.next() {
            lines.push(Line::from(format!("• {first}")));
        }
        lines.extend(chunks.map(|chunk| Line::from(format!("  {chunk}"))));
    }

    lines.push(secondary_line(format!(
        "Last updated: {}",
        format_display_time(record.timestamp)
    )));
    lines
}
