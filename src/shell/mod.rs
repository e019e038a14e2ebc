//! Process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{execute, CommandResult, ProgramSpec};
pub use platform::{is_ci, Interpreter};
