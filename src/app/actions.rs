//! User intents and their effect on session state.

use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InputChar(char),
    InputBackspace,
    Paste(String),
    InputSubmit,
    ScrollUp(u16),
    ScrollDown(u16),
    Redraw,
    Quit,
}

/// What the control loop must do after an action was applied.
#[derive(Debug, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    /// Start a turn with this request
    Submit(String),
    Quit,
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::InputChar(c) => {
            state.input.push(c);
            state.dirty = true;
        }
        Action::InputBackspace => {
            if state.input.pop().is_some() {
                state.dirty = true;
            }
        }
        Action::Paste(text) => {
            // Single-line input box
            let flat: String = text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }).collect();
            state.input.push_str(&flat);
            state.dirty = true;
        }
        Action::InputSubmit => return handle_input_submit(state),
        Action::ScrollUp(amount) => {
            state.scroll_offset = state.scroll_offset.saturating_add(amount);
            state.dirty = true;
        }
        Action::ScrollDown(amount) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(amount);
            state.dirty = true;
        }
        Action::Redraw => state.dirty = true,
        Action::Quit => return ActionResult::Quit,
    }
    ActionResult::Nothing
}

/// Empty input and input while streaming are ignored without touching state.
fn handle_input_submit(state: &mut State) -> ActionResult {
    if state.is_streaming() || state.input.trim().is_empty() {
        return ActionResult::Nothing;
    }
    let request = std::mem::take(&mut state.input);
    state.dirty = true;
    ActionResult::Submit(request)
}
