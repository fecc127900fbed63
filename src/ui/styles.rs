use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Accent color used for headers and status badges.
pub const ACCENT: Color = Color::Indexed(208);

pub fn header_text<'a>(text: impl Into<Cow<'a, str>>) -> Text<'a> {
    let owned = text.into().into_owned();
    Text::from(owned.bold().fg(ACCENT))
}

/// Dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

pub fn error_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(Span::styled(
        owned,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
}

/// Green for positive market impact, red for negative.
pub fn impact_style(impact: i64) -> Style {
    match impact {
        i if i > 0 => Style::default().fg(Color::Green),
        i if i < 0 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Gray),
    }
}
