pub mod config;
pub mod contracts;
pub mod render;
pub mod session;
pub mod source;
pub mod telemetry;
pub mod ui;

pub mod error;
