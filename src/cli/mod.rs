//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{parse_color, parse_size, Args, Command, ConfigAction, RunSettings};
pub use commands::{handle_config_action, write_default_config, DEFAULT_CONFIG};
pub use enums::{InputFormat, InterpolationArg};
