pub mod config;
pub mod modules;
pub mod state;
pub mod storage;
pub mod tools;
