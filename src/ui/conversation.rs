use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::wrapped_height;
use super::theme;
use super::transcript::{ASSISTANT_LABEL, STREAMING_HEADER, USER_LABEL};
use crate::state::State;

pub fn render_conversation(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(base_style)
        .title(Span::styled(
            if state.is_streaming() { " Conversation ● " } else { " Conversation " },
            Style::default().fg(theme::ACCENT).bold(),
        ));

    let content_area = block.inner(area);
    frame.render_widget(block, area);

    if state.content.is_empty() {
        let hint = Line::from(Span::styled(
            "  Describe your language, or ask for a word to get started",
            Style::default().fg(theme::TEXT_MUTED).italic(),
        ));
        frame.render_widget(Paragraph::new(vec![Line::from(""), hint]), content_area);
        return;
    }

    let lines: Vec<Line> = state.content.lines().map(style_line).collect();

    // Follow the bottom; scroll_offset counts rows up from there
    let width = content_area.width as usize;
    let total: usize = state.content.lines().map(|l| wrapped_height(l, width)).sum();
    let max_scroll = total.saturating_sub(content_area.height as usize);
    let scroll = max_scroll.saturating_sub(state.scroll_offset as usize);

    let paragraph = Paragraph::new(lines)
        .style(base_style)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, content_area);
}

fn style_line(line: &str) -> Line<'_> {
    if let Some(rest) = line.strip_prefix(USER_LABEL) {
        return Line::from(vec![
            Span::styled(USER_LABEL, Style::default().fg(theme::USER).bold()),
            Span::styled(rest, Style::default().fg(theme::TEXT)),
        ]);
    }
    if let Some(rest) = line.strip_prefix(ASSISTANT_LABEL) {
        return Line::from(vec![
            Span::styled(ASSISTANT_LABEL, Style::default().fg(theme::ASSISTANT).bold()),
            Span::styled(rest, Style::default().fg(theme::TEXT)),
        ]);
    }
    if line == STREAMING_HEADER {
        return Line::from(Span::styled(line, Style::default().fg(theme::ACCENT).bold()));
    }
    if line.starts_with("... (showing last") {
        return Line::from(Span::styled(line, Style::default().fg(theme::TEXT_MUTED).italic()));
    }
    if line.trim_start().starts_with(crate::llms::TOOL_CALL_MARKER) {
        return Line::from(Span::styled(line, Style::default().fg(theme::SUCCESS)));
    }
    Line::from(Span::styled(line, Style::default().fg(theme::TEXT)))
}
