use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::app::actions::Action;
use crate::infra::constants::{SCROLL_ARROW_AMOUNT, SCROLL_PAGE_AMOUNT};

/// Map a terminal event to an action. `None` means the event is ignored.
pub fn handle_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
                    _ => None,
                };
            }
            match key.code {
                KeyCode::Char(c) => Some(Action::InputChar(c)),
                KeyCode::Backspace => Some(Action::InputBackspace),
                KeyCode::Enter => Some(Action::InputSubmit),
                KeyCode::Up => Some(Action::ScrollUp(SCROLL_ARROW_AMOUNT)),
                KeyCode::Down => Some(Action::ScrollDown(SCROLL_ARROW_AMOUNT)),
                KeyCode::PageUp => Some(Action::ScrollUp(SCROLL_PAGE_AMOUNT)),
                KeyCode::PageDown => Some(Action::ScrollDown(SCROLL_PAGE_AMOUNT)),
                _ => None,
            }
        }
        Event::Paste(text) => Some(Action::Paste(text.clone())),
        Event::Resize(_, _) => Some(Action::Redraw),
        _ => None,
    }
}
