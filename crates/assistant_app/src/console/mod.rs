mod app;
mod commands;
pub mod config;
mod effects;
mod render;

pub use app::{run, OutputMode};
