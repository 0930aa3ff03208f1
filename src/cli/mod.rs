//! Line-oriented shell that drives a [`Session`](crate::core::Session).

mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use context::{CliMode, CommandError, CommandResult, LoopControl, ShellContext};
pub use shell::{parse_command_line, run_cli};
