//! symbotctl library - exposes modules for testing

pub mod app;
pub mod cli;
pub mod logging;
pub mod render;
pub mod repl;
