use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{prelude::*, widgets::*};

use crate::app::Dashboard;
use crate::config::Config;
use crate::error::Result;
use crate::feed::ScrollSignal;
use crate::fetch::PagedFetcher;
use crate::ui::components::{
    article_lines, dashboard_areas, split_status_row, summary_lines, ArticleListState,
    TerminalGuard,
};
use crate::ui::styles::{error_line, header_text, secondary_span};
use crate::utils::current_human_timestamp;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SUMMARY_MAX_ROWS: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Scroll(ScrollMove),
    Quit,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollMove {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

fn classify_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Scroll(ScrollMove::Up),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Scroll(ScrollMove::Down),
        KeyCode::PageUp => KeyAction::Scroll(ScrollMove::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => KeyAction::Scroll(ScrollMove::PageDown),
        KeyCode::Home | KeyCode::Char('g') => KeyAction::Scroll(ScrollMove::Top),
        KeyCode::End | KeyCode::Char('G') => KeyAction::Scroll(ScrollMove::Bottom),
        _ => KeyAction::Ignore,
    }
}

fn apply_scroll(state: &mut ArticleListState, movement: ScrollMove) {
    match movement {
        ScrollMove::Up => state.scroll_by(-1),
        ScrollMove::Down => state.scroll_by(1),
        ScrollMove::PageUp => state.scroll_by(-state.page_rows()),
        ScrollMove::PageDown => state.scroll_by(state.page_rows()),
        ScrollMove::Top => state.scroll_to_top(),
        ScrollMove::Bottom => state.scroll_to_bottom(),
    }
}

/// Interactive dashboard: both feeds on their timers, list paging on scroll.
pub async fn run_dashboard(config: &Config, fetcher: PagedFetcher) -> Result<()> {
    let scroll = ScrollSignal::new();
    let mut dashboard = Dashboard::new(config, fetcher);
    let mut list_state = ArticleListState::default();

    let mut guard = TerminalGuard::new()?;
    dashboard.start(&scroll);

    let outcome = event_loop(&mut guard, &mut dashboard, &scroll, &mut list_state).await;

    dashboard.teardown();
    guard.restore()?;
    info!(
        "dashboard closed after {} requests",
        dashboard.requests_issued()
    );
    outcome
}

async fn event_loop(
    guard: &mut TerminalGuard,
    dashboard: &mut Dashboard,
    scroll: &ScrollSignal,
    list_state: &mut ArticleListState,
) -> Result<()> {
    loop {
        dashboard.pump();
        guard
            .terminal_mut()
            .draw(|f| draw_dashboard(f, dashboard, list_state))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match classify_key(&key) {
                    KeyAction::Quit => break,
                    KeyAction::Scroll(movement) => {
                        apply_scroll(list_state, movement);
                        scroll.publish(list_state.metrics());
                    }
                    KeyAction::Ignore => {}
                }
            }
        } else {
            tokio::task::yield_now().await;
        }
    }
    Ok(())
}

fn draw_dashboard(f: &mut Frame, dashboard: &Dashboard, list_state: &mut ArticleListState) {
    let size = f.size();
    let summary_view = dashboard.summary();
    let article_view = dashboard.articles();

    let summary_width = size.width.saturating_sub(2);
    let mut summary_body = Vec::new();
    if let Some(message) = summary_view.error_message {
        summary_body.push(error_line(message.to_string()));
    }
    summary_body.extend(summary_lines(&summary_view, summary_width));
    let summary_rows = (summary_body.len() as u16)
        .saturating_add(2)
        .min(SUMMARY_MAX_ROWS);

    let areas = dashboard_areas(size, summary_rows);

    let mut header = header_text("Crypto News Dashboard");
    header.lines.push(Line::from(secondary_span(format!(
        "Now: {}",
        current_human_timestamp()
    ))));
    f.render_widget(Paragraph::new(header), areas.header);

    let summary_title = if summary_view.is_loading && summary_view.record.is_some() {
        "Market Summary (refreshing)"
    } else {
        "Market Summary"
    };
    let summary_block = Block::default().borders(Borders::ALL).title(summary_title);
    f.render_widget(Paragraph::new(summary_body).block(summary_block), areas.summary);

    let list_block = Block::default().borders(Borders::ALL).title("Latest News");
    let list_inner = list_block.inner(areas.articles);
    f.render_widget(list_block, areas.articles);

    let list_area = match article_view.error_message {
        Some(message) => {
            let (status, rest) = split_status_row(list_inner, 1);
            f.render_widget(Paragraph::new(error_line(message.to_string())), status);
            rest
        }
        None => list_inner,
    };

    let lines = article_lines(&article_view, list_area.width);
    list_state.set_geometry(usize::from(list_area.height), lines.len());
    let offset = u16::try_from(list_state.offset()).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), list_area);

    let help = Paragraph::new(Line::from(secondary_span(
        "↑/↓ j/k scroll | PgUp/PgDn page | Home/End jump | q quit",
    )));
    f.render_widget(help, areas.help);
}
