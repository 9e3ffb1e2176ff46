/*
[INPUT]:  CLI configuration and subcommands
[OUTPUT]: Library surface shared by the binary and its tests
[POS]:    Crate root - module wiring
[UPDATE]: When adding modules
*/

pub mod commands;
pub mod config;

pub use commands::{Command, PlannedRequest};
pub use config::CliConfig;
