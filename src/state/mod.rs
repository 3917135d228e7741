//! Live session state, owned and mutated only by the control loop.

pub mod persistence;
pub mod runtime;

pub use persistence::load_state;
pub use runtime::{Phase, State};
