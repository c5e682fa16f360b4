//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `depcheck check` verifies installed packages (the default)
//! - `depcheck lint` only parses the requirements

pub mod check;
pub mod dispatcher;
pub mod input;
pub mod lint;

pub use dispatcher::{Command, CommandDispatcher, CommandOutput, CommandResult};
