//! TUI Memory (workspace facade crate).
//!
//! Re-exports the workspace crates under stable `tui_memory::{core,input,term,types}`
//! paths and hosts the application layer: configuration, logging, and the frame
//! loop that drives a [`core::GameSession`] against the terminal.

pub mod config;
pub mod controller;
pub mod logging;

pub use tui_memory_core as core;
pub use tui_memory_input as input;
pub use tui_memory_term as term;
pub use tui_memory_types as types;

pub use config::{CliCommand, GameConfig};
pub use controller::{run_game, Controller, ExitStatus, MismatchPause};
