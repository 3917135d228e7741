use std::sync::Arc;
use std::sync::mpsc::Receiver;

use l2_base::storage::Store;

use crate::infra::api::StreamEvent;
use crate::llms::Backend;
use crate::state::State;

/// The control loop: sole owner and mutator of the session state.
pub struct App {
    pub state: State,
    pub(super) backend: Arc<dyn Backend>,
    pub(super) store: Store,
    /// Queue of the active stream, if any
    pub(super) stream_rx: Option<Receiver<StreamEvent>>,
}

impl App {
    pub fn new(state: State, backend: Arc<dyn Backend>, store: Store) -> Self {
        Self { state, backend, store, stream_rx: None }
    }
}
