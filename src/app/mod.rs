pub mod actions;
mod app;
pub mod context;
pub mod events;
mod run;

pub use app::App;
