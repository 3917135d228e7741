//! Token stream pump: runs one turn's backend stream off the control loop.
//!
//! The worker thread is the only writer of the bounded queue and the only
//! incrementer of the token counter while it runs. Dropping the sender at
//! the end of `run_stream` closes the queue; the control loop sees that as
//! end of stream.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use l2_base::state::{TokenCounter, Turn};

use super::constants::{STREAM_QUEUE_CAPACITY, SUMMARY_TIMEOUT};
use crate::app::context::build_outbound;
use crate::llms::{Backend, Fragment};

/// Events delivered to the control loop
#[derive(Debug)]
pub enum StreamEvent {
    /// One fragment of the response
    Fragment(Fragment),
    /// The stream opened and then broke; whatever arrived is kept
    Failed(String),
    /// The connection could not be opened; the turn is aborted
    StartFailed(String),
}

/// What the worker needs to build and send one request.
pub struct StreamParams {
    /// History snapshot, including the user turn just submitted
    pub history: Vec<Turn>,
    /// Raw user input
    pub request: String,
}

/// Start streaming one turn and return the receiving end of its queue.
pub fn start_streaming(
    backend: Arc<dyn Backend>,
    params: StreamParams,
    counter: TokenCounter,
) -> Receiver<StreamEvent> {
    let (tx, rx) = mpsc::sync_channel(STREAM_QUEUE_CAPACITY);
    thread::spawn(move || run_stream(backend, params, counter, tx));
    rx
}

fn run_stream(backend: Arc<dyn Backend>, params: StreamParams, counter: TokenCounter, tx: SyncSender<StreamEvent>) {
    let messages = build_outbound(&params.history, &params.request, &backend, SUMMARY_TIMEOUT);
    tracing::debug!(outbound = messages.len(), model = backend.model(), "stream starting");

    let mut delivered = 0usize;
    let mut receiver_gone = false;
    let mut emit = |fragment: Fragment| {
        if receiver_gone {
            return;
        }
        if fragment.is_text() {
            counter.increment();
        }
        delivered += 1;
        if tx.send(StreamEvent::Fragment(fragment)).is_err() {
            receiver_gone = true;
        }
    };
    let result = backend.stream(&messages, &mut emit);

    match result {
        Ok(()) => tracing::debug!(delivered, "stream finished"),
        Err(e) if delivered == 0 && e.is_connection_failure() => {
            tracing::warn!(error = %e, "stream failed to start");
            let _ = tx.send(StreamEvent::StartFailed(e.to_string()));
        }
        Err(e) => {
            tracing::warn!(error = %e, delivered, "stream ended early");
            let _ = tx.send(StreamEvent::Failed(e.to_string()));
        }
    }
}
