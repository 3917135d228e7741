use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::helpers::{format_number, truncate_string};
use super::theme;
use crate::state::State;

pub fn render_input(frame: &mut Frame, state: &State, area: Rect) {
    let border = if state.is_streaming() { theme::BORDER } else { theme::ACCENT_DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::BG_INPUT));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let prompt = Span::styled("› ", Style::default().fg(theme::ACCENT).bold());
    let line = if state.input.is_empty() && state.is_streaming() {
        Line::from(vec![prompt, Span::styled("waiting for the response…", Style::default().fg(theme::TEXT_MUTED))])
    } else {
        Line::from(vec![prompt, Span::styled(state.input.as_str(), Style::default().fg(theme::TEXT))])
    };

    // Keep the tail of long input visible
    let visible = state.input.chars().count() as u16 + 2;
    let hscroll = visible.saturating_sub(inner.width.saturating_sub(1));
    frame.render_widget(Paragraph::new(line).scroll((0, hscroll)), inner);

    if !state.is_streaming() {
        frame.set_cursor_position((inner.x + visible.min(inner.width.saturating_sub(1)), inner.y));
    }
}

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let mut spans = vec![Span::styled(" ", base_style)];

    if state.is_streaming() {
        spans.push(Span::styled(" STREAMING ", Style::default().fg(theme::BG_BASE).bg(theme::SUCCESS).bold()));
    } else {
        spans.push(Span::styled(" READY ", Style::default().fg(theme::BG_BASE).bg(theme::TEXT_MUTED).bold()));
    }
    spans.push(Span::styled(" ", base_style));

    spans.push(Span::styled(
        format!(" {} ", truncate_string(&state.model_name, 40)),
        Style::default().fg(theme::TEXT).bg(theme::BG_ELEVATED),
    ));
    spans.push(Span::styled(" ", base_style));

    spans.push(Span::styled(format!("{} tokens", format_number(state.stats.get())), base_style));

    if let Some(ref warning) = state.last_warning {
        spans.push(Span::styled("  ", base_style));
        let room = (area.width as usize).saturating_sub(60).max(20);
        let text = format!(" ⚠ {} ", truncate_string(warning, room));
        spans.push(Span::styled(text, Style::default().fg(theme::WARNING)));
    }

    let hints = " Enter send · ↑↓ scroll · Ctrl+Q quit ";
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + hints.chars().count());
    spans.push(Span::styled(" ".repeat(pad), base_style));
    spans.push(Span::styled(hints, base_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), area);
}
