use crate::app::App;
use crate::app::actions::{Action, ActionResult, apply_action};
use crate::infra::api::{StreamParams, start_streaming};

impl App {
    /// Apply one user action; starts a turn or quits when the action calls for it.
    pub fn handle_action(&mut self, action: Action) {
        match apply_action(&mut self.state, action) {
            ActionResult::Nothing => {}
            ActionResult::Submit(request) => self.start_turn(request),
            ActionResult::Quit => self.quit(),
        }
    }

    /// `Idle -> Streaming`: record the user turn and hand the request to a stream worker.
    fn start_turn(&mut self, request: String) {
        self.state.begin_turn(request.clone());
        self.state.last_warning = None;
        tracing::info!(chars = request.chars().count(), history = self.state.history.len(), "turn submitted");

        let params = StreamParams { history: self.state.history.clone(), request };
        self.stream_rx = Some(start_streaming(self.backend.clone(), params, self.state.stats.clone()));
    }
}
