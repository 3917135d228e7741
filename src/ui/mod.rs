mod conversation;
mod helpers;
mod input;
mod theme;
pub mod throttle;
pub mod transcript;

use ratatui::{prelude::*, widgets::Block};

use crate::state::State;

const BANNER: [&str; 3] = [" ╻  ┏━┓ ", " ┃  ┏━┛   conlang workbench", " ┗━╸┗━╸ "];
/// Banner is only drawn on terminals taller than this
const BANNER_MIN_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    let banner_height = if area.height > BANNER_MIN_HEIGHT { BANNER.len() as u16 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Banner
            Constraint::Min(1),                // Conversation
            Constraint::Length(3),             // Input
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    if banner_height > 0 {
        render_banner(frame, layout[0]);
    }
    conversation::render_conversation(frame, state, layout[1]);
    input::render_input(frame, state, layout[2]);
    input::render_status_bar(frame, state, layout[3]);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> =
        BANNER.iter().map(|l| Line::from(Span::styled(*l, Style::default().fg(theme::ACCENT).bold()))).collect();
    frame.render_widget(ratatui::widgets::Paragraph::new(lines), area);
}
